#[macro_use]
mod common;

#[cfg(test)]
mod comment {
    tests! {
        line_comment_is_ignored is OK
        r#"
        // this whole line does nothing
        print "hello";
        "#,
        "hello"
    }

    tests! {
        trailing_line_comment_is_ignored is OK
        r#"print "hello"; // trailing remark"#,
        "hello"
    }

    tests! {
        block_comment_is_ignored is OK
        r#"
        /* this is
           a multiline
           block comment */
        print "hello";
        "#,
        "hello"
    }

    tests! {
        block_comment_between_tokens_acts_as_whitespace is OK
        r#"print /* inline */ "hello";"#,
        "hello"
    }

    tests! {
        unterminated_block_comment_is_scan_error is ERR
        "/* never closed",
        "Unterminated block comment."
    }
}
