#[macro_use]
mod common;

#[cfg(test)]
mod bool {
    tests! {
        literals_print_as_true_and_false is OK
        r#"
        print true;
        print false;
        "#,
        "true",
        "false"
    }

    tests! {
        equality_is_by_value is OK
        r#"
        print true == true;
        print true == false;
        print true == 1;
        "#,
        "true",
        "false",
        "false"
    }

    tests! {
        not_operator_negates is OK
        r#"
        print !true;
        print !false;
        print !nil;
        print !0;
        "#,
        "false",
        "true",
        "true",
        "false"
    }
}
