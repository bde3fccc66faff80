#[macro_use]
mod common;

#[cfg(test)]
mod closure {
    tests! {
        close_over_later_variable is OK
        r#"
        var f;
        {
            var a = "a";
            var b = "b";
            fun g() {
                print a;
                print b;
            }
            f = g;
        }
        f();
        "#,
        "a",
        "b"
    }

    tests! {
        reassignment_is_visible_through_closure is OK
        r#"
        {
            var a = "first";
            fun show() { print a; }
            show();
            a = "second";
            show();
        }
        "#,
        "first",
        "second"
    }

    tests! {
        assign_to_closure is OK
        r#"
        var f;
        var g;

        {
            var local = "local";
            fun set_local() { local = "set"; }
            fun print_local() { print local; }
            f = set_local;
            g = print_local;
        }

        f();
        g();
        "#,
        "set"
    }

    tests! {
        nested_closures_capture_independently is OK
        r#"
        fun make_counter() {
            var count = 0;
            fun increment() {
                count = count + 1;
                return count;
            }
            return increment;
        }

        var a = make_counter();
        var b = make_counter();
        print a();
        print a();
        print b();
        "#,
        "1",
        "2",
        "1"
    }
}
