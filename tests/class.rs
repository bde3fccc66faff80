#[macro_use]
mod common;

#[cfg(test)]
mod class {
    tests! {
        printing_a_class_prints_its_name is OK
        r#"
        class Spaceship {}
        print Spaceship;
        "#,
        "Spaceship"
    }

    tests! {
        printing_an_instance_shows_class_and_instance is OK
        r#"
        class Spaceship {}
        print Spaceship();
        "#,
        "Spaceship instance"
    }

    tests! {
        local_class_can_reference_itself_in_body is OK
        r#"
        {
            class Foo {
                returns_class() { return Foo; }
            }
            print Foo().returns_class();
        }
        "#,
        "Foo"
    }

    tests! {
        calling_class_with_wrong_arity_is_runtime_error is ERR
        r#"
        class Point {
            init(x, y) {
                this.x = x;
                this.y = y;
            }
        }
        Point(1);
        "#,
        "Expected 2 arguments but got 1."
    }

    tests! {
        calling_a_non_callable_value_is_runtime_error is ERR
        r#"
        var not_callable = 1;
        not_callable();
        "#,
        "Can only call functions and classes."
    }
}
