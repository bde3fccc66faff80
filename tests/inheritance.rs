#[macro_use]
mod common;

#[cfg(test)]
mod inheritance {
    tests! {
        inherited_method_is_visible_on_subclass is OK
        r#"
        class Doughnut {
            cook() {
                print "Fry until golden brown.";
            }
        }

        class BostonCream < Doughnut {}

        BostonCream().cook();
        "#,
        "Fry until golden brown."
    }

    tests! {
        subclass_can_override_method is OK
        r#"
        class A {
            method() { print "A method"; }
        }

        class B < A {
            method() { print "B method"; }
        }

        B().method();
        "#,
        "B method"
    }

    tests! {
        inheriting_from_non_class_is_runtime_error is ERR
        r#"
        var NotAClass = "I am totally not a class";
        class Subclass < NotAClass {}
        "#,
        "Superclass must be a class."
    }

    tests! {
        class_cannot_inherit_from_itself is ERR
        "class Oops < Oops {}",
        "A class can't inherit from itself."
    }
}
