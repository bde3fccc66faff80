use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::Rc;

/// An in-process stdout substitute backed by a shared buffer, so a test can
/// both run a script and read back everything it printed.
pub struct SharedBuffer(pub Rc<RefCell<Vec<u8>>>);

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Runs a snippet of Lox source and asserts on either its `print` output
/// (`OK`) or the diagnostics it reports (`ERR`). Source is embedded inline
/// rather than loaded from a fixture file, and every stage runs in-process
/// against shared buffers rather than through the built binary.
#[macro_export]
macro_rules! tests {
    ($name:ident is OK $source:expr $(, $expected:expr)* $(,)?) => {
        #[test]
        fn $name() {
            use std::cell::RefCell;
            use std::rc::Rc;
            use rocks_lang::Rocks;
            use $crate::common::SharedBuffer;

            let buffer = Rc::new(RefCell::new(Vec::new()));
            let stdout: Box<dyn std::io::Write> = Box::new(SharedBuffer(Rc::clone(&buffer)));
            let diagnostics = Rc::new(RefCell::new(String::new()));

            let mut rocks = Rocks::buffered(Rc::clone(&diagnostics), Rc::new(RefCell::new(stdout)));
            rocks.run_line($source);

            let mut expected_lines: Vec<&str> = vec![$($expected),*];
            let expected = if expected_lines.is_empty() {
                String::new()
            } else {
                expected_lines.push("");
                expected_lines.join("\n")
            };

            let output = String::from_utf8(buffer.borrow().clone()).expect("print output to be valid utf-8");
            assert_eq!(expected, output, "diagnostics were: {}", diagnostics.borrow());
            assert!(!rocks.did_error(), "unexpected diagnostics: {}", diagnostics.borrow());
        }
    };

    // Checks that each expected fragment appears somewhere in the reported
    // diagnostics, rather than matching the whole `[line L:C] ...` text
    // verbatim — the messages themselves are what these tests pin down, not
    // the exact source offsets of the embedded snippet.
    ($name:ident is ERR $source:expr $(, $expected:expr)+ $(,)?) => {
        #[test]
        fn $name() {
            use std::cell::RefCell;
            use std::rc::Rc;
            use rocks_lang::Rocks;
            use $crate::common::SharedBuffer;

            let buffer = Rc::new(RefCell::new(Vec::new()));
            let stdout: Box<dyn std::io::Write> = Box::new(SharedBuffer(Rc::clone(&buffer)));
            let diagnostics = Rc::new(RefCell::new(String::new()));

            let mut rocks = Rocks::buffered(Rc::clone(&diagnostics), Rc::new(RefCell::new(stdout)));
            rocks.run_line($source);

            assert!(rocks.did_error(), "expected an error, diagnostics were: {}", diagnostics.borrow());

            let reported = diagnostics.borrow();
            $(
                assert!(
                    reported.contains($expected),
                    "expected diagnostics to contain {:?}, got: {}",
                    $expected,
                    reported,
                );
            )+
        }
    };
}
