#[macro_use]
mod common;

#[cfg(test)]
mod constructor {
    tests! {
        init_runs_on_construction is OK
        r#"
        class Point {
            init(x, y) {
                this.x = x;
                this.y = y;
            }
        }
        var p = Point(1, 2);
        print p.x;
        print p.y;
        "#,
        "1",
        "2"
    }

    tests! {
        init_always_returns_the_instance is OK
        r#"
        class Thing {
            init() {
                return;
            }
        }
        print Thing();
        "#,
        "Thing instance"
    }

    tests! {
        calling_init_directly_on_instance_reinitializes_it is OK
        r#"
        class Counter {
            init() {
                this.count = 0;
            }
            increment() {
                this.count = this.count + 1;
            }
        }
        var c = Counter();
        c.increment();
        c.increment();
        print c.count;
        c.init();
        print c.count;
        "#,
        "2",
        "0"
    }

    tests! {
        class_with_no_init_has_zero_arity is OK
        r#"
        class Empty {}
        print Empty();
        "#,
        "Empty instance"
    }
}
