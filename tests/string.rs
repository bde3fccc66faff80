#[macro_use]
mod common;

#[cfg(test)]
mod string {
    tests! {
        literal_prints_without_quotes is OK
        r#"print "hello world";"#,
        "hello world"
    }

    tests! {
        empty_string_literal is OK
        r#"print "";"#,
        ""
    }

    tests! {
        multiline_string_literal is OK
        "print \"line one\nline two\";",
        "line one",
        "line two"
    }

    tests! {
        unterminated_string_is_scan_error is ERR
        "print \"unterminated;",
        "Unterminated string."
    }
}
