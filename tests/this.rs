#[macro_use]
mod common;

#[cfg(test)]
mod this {
    tests! {
        this_refers_to_calling_instance is OK
        r#"
        class Egotist {
            speak() {
                print this;
            }
        }
        Egotist().speak();
        "#,
        "Egotist instance"
    }

    tests! {
        this_binds_when_method_is_extracted is OK
        r#"
        class Person {
            init(name) {
                this.name = name;
            }
            say_name() {
                print this.name;
            }
        }

        var jane = Person("Jane");
        var method = jane.say_name;
        method();
        "#,
        "Jane"
    }

    tests! {
        nested_function_inside_method_still_sees_enclosing_this is OK
        r#"
        class Thing {
            get_callback() {
                fun local_function() {
                    print this;
                }
                return local_function;
            }
        }

        var callback = Thing().get_callback();
        callback();
        "#,
        "Thing instance"
    }

    tests! {
        this_outside_class_is_resolve_error is ERR
        "print this;",
        "Can't use 'this' outside of a class."
    }
}
