#[macro_use]
mod common;

#[cfg(test)]
mod regression {
    tests! {
        dangling_else_binds_to_nearest_if is OK
        r#"
        if (true) if (false) print "inner"; else print "else";
        "#,
        "else"
    }

    tests! {
        closures_created_in_a_loop_share_the_loop_variable is OK
        r#"
        fun make() {
            var captured = nil;
            for (var i = 0; i < 3; i = i + 1) {
                fun show() { print i; }
                captured = show;
            }
            captured();
        }
        make();
        "#,
        "3"
    }

    tests! {
        super_call_two_levels_deep_still_resolves is OK
        r#"
        class A {
            greet() { print "A"; }
        }
        class B < A {
            greet() {
                {
                    var noise = "shadow";
                    super.greet();
                }
            }
        }
        class C < B {
            greet() {
                super.greet();
            }
        }
        C().greet();
        "#,
        "A"
    }

    tests! {
        recursive_class_reference_inside_own_method is OK
        r#"
        class Node {
            child(value) {
                return Node();
            }
        }
        var n = Node();
        print n.child(1);
        "#,
        "Node instance"
    }
}
