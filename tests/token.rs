#[macro_use]
mod common;

#[cfg(test)]
mod token {
    tests! {
        unexpected_character_is_scan_error is ERR
        "var a = 1 @ 2;",
        "Unexpected character."
    }

    tests! {
        unterminated_string_is_scan_error is ERR
        r#"print "never closed;"#,
        "Unterminated string."
    }

    tests! {
        number_with_fractional_part_scans_correctly is OK
        "print 3.14;",
        "3.14"
    }

    tests! {
        number_without_fractional_part_has_no_trailing_dot is OK
        "print 10;",
        "10"
    }

    tests! {
        identifier_can_contain_digits_and_underscores is OK
        r#"
        var my_var_2 = "value";
        print my_var_2;
        "#,
        "value"
    }

    tests! {
        keywords_are_not_valid_identifiers is ERR
        "var class = 1;",
        "Expect variable name."
    }

    tests! {
        multi_char_operators_are_scanned_as_single_tokens is OK
        r#"
        print 1 <= 2;
        print 2 >= 3;
        print 1 != 2;
        print 1 == 1;
        "#,
        "true",
        "false",
        "true",
        "true"
    }
}
