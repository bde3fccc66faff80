#[macro_use]
mod common;

#[cfg(test)]
mod for_ {
    tests! {
        counts_up is OK
        r#"
        for (var i = 0; i < 3; i = i + 1) {
            print i;
        }
        "#,
        "0",
        "1",
        "2"
    }

    tests! {
        initializer_clause_is_optional is OK
        r#"
        var i = 0;
        for (; i < 2; i = i + 1) {
            print i;
        }
        "#,
        "0",
        "1"
    }

    tests! {
        closure_in_body_captures_each_iteration_variable is OK
        r#"
        fun make() {
            for (var i = 1; i <= 3; i = i + 1) {
                fun show() {
                    print i;
                }
                show();
            }
        }
        make();
        "#,
        "1",
        "2",
        "3"
    }
}
