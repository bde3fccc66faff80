#[macro_use]
mod common;

#[cfg(test)]
mod function {
    tests! {
        recursive_function_computes_factorial is OK
        r#"
        fun fact(n) {
            if (n <= 1) return 1;
            return n * fact(n - 1);
        }
        print fact(5);
        "#,
        "120"
    }

    tests! {
        function_with_no_return_yields_nil is OK
        r#"
        fun noop() {}
        print noop();
        "#,
        "nil"
    }

    tests! {
        function_is_a_first_class_value is OK
        r#"
        fun add(a, b) { return a + b; }
        var op = add;
        print op(2, 3);
        "#,
        "5"
    }

    tests! {
        function_can_be_passed_as_argument is OK
        r#"
        fun apply(f, x) { return f(x); }
        fun double(n) { return n * 2; }
        print apply(double, 21);
        "#,
        "42"
    }

    tests! {
        printing_a_function_shows_its_name is OK
        r#"
        fun greet() {}
        print greet;
        "#,
        "<fn greet>"
    }

    tests! {
        each_call_gets_a_fresh_environment is OK
        r#"
        fun counter() {
            var n = 0;
            n = n + 1;
            return n;
        }
        print counter();
        print counter();
        "#,
        "1",
        "1"
    }
}
