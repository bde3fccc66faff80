#[macro_use]
mod common;

#[cfg(test)]
mod super_ {
    tests! {
        call_superclass_method is OK
        r#"
        class Base {
            greet() { print "Hello from Base"; }
        }

        class Derived < Base {
            greet() {
                super.greet();
                print "Hello from Derived";
            }
        }

        Derived().greet();
        "#,
        "Hello from Base",
        "Hello from Derived"
    }

    tests! {
        super_resolves_through_intermediate_class is OK
        r#"
        class A {
            method() { print "A"; }
        }

        class B < A {}

        class C < B {
            method() {
                super.method();
            }
        }

        C().method();
        "#,
        "A"
    }

    tests! {
        super_bound_to_instance_this is OK
        r#"
        class A {
            say_name() { print this.name; }
        }

        class B < A {
            say_name() {
                var closure = super.say_name;
                closure();
            }
        }

        class C < B {
            init() { this.name = "C instance"; }
        }

        C().say_name();
        "#,
        "C instance"
    }

    tests! {
        super_outside_class_is_resolve_error is ERR
        "super.method();",
        "Can't use 'super' outside of a class."
    }

    tests! {
        super_without_superclass_is_resolve_error is ERR
        r#"
        class Base {
            method() { super.method(); }
        }
        "#,
        "Can't use 'super' in a class with no superclass."
    }
}
