#[macro_use]
mod common;

#[cfg(test)]
mod field {
    tests! {
        field_set_and_get is OK
        r#"
        class Box {}
        var box = Box();
        box.contents = "secret";
        print box.contents;
        "#,
        "secret"
    }

    tests! {
        fields_are_per_instance is OK
        r#"
        class Box {}
        var a = Box();
        var b = Box();
        a.value = "a";
        b.value = "b";
        print a.value;
        print b.value;
        "#,
        "a",
        "b"
    }

    tests! {
        field_shadows_method_of_same_name is OK
        r#"
        class Box {
            greet() { print "method"; }
        }
        var box = Box();
        box.greet = "field";
        print box.greet;
        "#,
        "field"
    }

    tests! {
        getting_property_on_non_instance_is_runtime_error is ERR
        r#"
        var n = 1;
        print n.value;
        "#,
        "Only instances have properties."
    }

    tests! {
        setting_property_on_non_instance_is_runtime_error is ERR
        r#"
        var n = 1;
        n.value = 2;
        "#,
        "Only instances have fields."
    }

    tests! {
        getting_undefined_property_is_runtime_error is ERR
        r#"
        class Box {}
        var box = Box();
        print box.missing;
        "#,
        "Undefined property 'missing'."
    }
}
