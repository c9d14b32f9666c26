use super::*;
use crate::ty::TypeKind;
use pretty_assertions::assert_eq;

fn param(ty: &str, name: &str) -> ParameterDecl {
    ParameterDecl {
        ty: ty.to_string(),
        name: name.to_string(),
        ..ParameterDecl::default()
    }
}

fn optional(ty: &str, name: &str, default_value: &str) -> ParameterDecl {
    ParameterDecl {
        optional: true,
        default_value: Some(default_value.to_string()),
        ..param(ty, name)
    }
}

fn method(name: &str, func: &str, overloads: Vec<Vec<ParameterDecl>>) -> MethodDecl {
    MethodDecl {
        name: name.to_string(),
        func: func.to_string(),
        return_type: "void".to_string(),
        overloads,
        ..MethodDecl::default()
    }
}

fn class(name: &str) -> ClassDecl {
    ClassDecl {
        class_name: name.to_string(),
        ..ClassDecl::default()
    }
}

fn lower(decl: &ClassDecl) -> ClassDescriptor {
    lower_class(decl).unwrap_or_else(|e| panic!("lowering failed: {e}"))
}

#[test]
fn test_dependencies_drop_self_and_duplicates() {
    let decl = ClassDecl {
        dependencies: vec![
            "Font".into(),
            "Bitmap".into(),
            "Font".into(),
            "Rect".into(),
        ],
        ..class("Bitmap")
    };
    assert_eq!(lower(&decl).dependencies(), ["Font", "Rect"]);
}

#[test]
fn test_aliases_share_one_implementation() {
    let decl = ClassDecl {
        methods: vec![
            method("==", "IsEqual", vec![vec![param("scoped_refptr<Color>", "other")]]),
            method("eql?", "IsEqual", vec![vec![param("scoped_refptr<Color>", "other")]]),
        ],
        ..class("Color")
    };
    let desc = lower(&decl);
    assert_eq!(desc.methods().len(), 2);
    assert_eq!(desc.implementations().len(), 1);
    let imp = &desc.implementations()[0];
    assert_eq!(imp.func, "IsEqual");
    assert!(matches!(imp.dispatch, Dispatch::Single(_)));
}

#[test]
fn test_overloads_merge_across_entries() {
    let decl = ClassDecl {
        methods: vec![
            method("set", "Set", vec![vec![param("int32_t", "value")]]),
            method(
                "set",
                "Set",
                vec![vec![param("int32_t", "value"), param("int32_t", "opacity")]],
            ),
        ],
        ..class("Sprite")
    };
    let desc = lower(&decl);
    let imp = &desc.implementations()[0];
    assert_eq!(imp.dispatch.overloads().len(), 2);
    assert_eq!(imp.dispatch.max_arity(), 2);
}

#[test]
fn test_equal_arity_is_ambiguous() {
    let decl = ClassDecl {
        methods: vec![method(
            "set",
            "Set",
            vec![
                vec![param("scoped_refptr<Font>", "value")],
                vec![param("int32_t", "value")],
            ],
        )],
        ..class("Graphics")
    };
    assert_eq!(
        lower_class(&decl),
        Err(DescriptorError::AmbiguousOverload {
            class: "Graphics".into(),
            func: "Set".into(),
            arity: 1,
        })
    );
}

#[test]
fn test_required_after_optional_is_rejected() {
    let decl = ClassDecl {
        methods: vec![method(
            "blt",
            "Blt",
            vec![vec![optional("int32_t", "x", "0"), param("int32_t", "y")]],
        )],
        ..class("Bitmap")
    };
    assert!(matches!(
        lower_class(&decl),
        Err(DescriptorError::NonTrailingOptional { ref param, .. }) if param == "y"
    ));
}

#[test]
fn test_optional_primitive_needs_default() {
    let decl = ClassDecl {
        methods: vec![method(
            "fill",
            "Fill",
            vec![vec![ParameterDecl {
                optional: true,
                ..param("int32_t", "alpha")
            }]],
        )],
        ..class("Bitmap")
    };
    assert!(matches!(
        lower_class(&decl),
        Err(DescriptorError::MissingDefault { .. })
    ));
}

#[test]
fn test_optional_handle_defaults_without_literal() {
    let decl = ClassDecl {
        methods: vec![method(
            "font=",
            "SetFont",
            vec![vec![ParameterDecl {
                optional: true,
                ..param("scoped_refptr<Font>", "value")
            }]],
        )],
        ..class("Bitmap")
    };
    let desc = lower(&decl);
    let sig = &desc.implementations()[0].dispatch.overloads()[0];
    assert!(sig.params[0].is_optional());
}

#[test]
fn test_alias_static_conflict() {
    let mut second = method("create", "New", vec![vec![]]);
    second.is_static = true;
    let decl = ClassDecl {
        methods: vec![method("initialize", "New", vec![vec![]]), second],
        ..class("Table")
    };
    assert!(matches!(
        lower_class(&decl),
        Err(DescriptorError::ConflictingAlias { what: "static-ness", .. })
    ));
}

#[test]
fn test_malformed_handle_names_member() {
    let decl = ClassDecl {
        attributes: vec![AttributeDecl {
            name: "font".into(),
            func: "Font".into(),
            ty: "scoped_refptr<>".into(),
            is_static: false,
        }],
        ..class("Bitmap")
    };
    assert_eq!(
        lower_class(&decl),
        Err(DescriptorError::TypeTag {
            class: "Bitmap".into(),
            member: "font".into(),
            source: TypeTagError::MalformedHandle("scoped_refptr<>".into()),
        })
    );
}

#[test]
fn test_unknown_attribute_tag_is_integer() {
    let decl = ClassDecl {
        attributes: vec![AttributeDecl {
            name: "mode".into(),
            func: "Mode".into(),
            ty: "BlendMode".into(),
            is_static: false,
        }],
        ..class("Sprite")
    };
    let desc = lower(&decl);
    assert_eq!(desc.attributes()[0].ty.kind(), &TypeKind::Integer);
    assert!(desc.attributes()[0].ty.is_fallback());
}

#[test]
fn test_missing_parameters_means_no_arguments() {
    let decl = ClassDecl {
        methods: vec![method("dispose", "Dispose", vec![])],
        ..class("Bitmap")
    };
    let desc = lower(&decl);
    assert_eq!(desc.implementations()[0].dispatch.max_arity(), 0);
}

#[test]
fn test_constructor_role() {
    let decl = ClassDecl {
        methods: vec![method("initialize", "New", vec![vec![]])],
        ..class("Bitmap")
    };
    assert_eq!(
        lower(&decl).implementations()[0].role,
        Some(ImplRole::Constructor)
    );
}

#[test]
fn test_invalid_names() {
    assert_eq!(
        lower_class(&class("my class")),
        Err(DescriptorError::InvalidClassName("my class".into()))
    );
    let decl = ClassDecl {
        methods: vec![method("", "Dispose", vec![])],
        ..class("Bitmap")
    };
    assert!(matches!(
        lower_class(&decl),
        Err(DescriptorError::InvalidName { what: "exposed", .. })
    ));
}

#[test]
fn test_batch_rejects_duplicate_class() {
    let decls = vec![class("Bitmap"), class("Font"), class("Bitmap")];
    assert_eq!(
        lower_batch(&decls),
        Err(DescriptorError::DuplicateClass("Bitmap".into()))
    );
}

#[test]
fn test_deserialize_parser_output() {
    let json = r#"{
        "class_name": "Graphics",
        "is_module": true,
        "dependency": ["Bitmap"],
        "attributes": [{"name": "frame_rate", "func": "FrameRate", "type": "int32_t", "is_static": true}],
        "methods": [{
            "name": "resize_screen",
            "func": "ResizeScreen",
            "is_static": true,
            "return_type": "void",
            "parameters": [[
                {"type": "int32_t", "name": "width", "optional": false, "default_value": ""},
                {"type": "int32_t", "name": "height", "optional": false, "default_value": ""}
            ]]
        }]
    }"#;
    let decl: ClassDecl =
        serde_json::from_str(json).unwrap_or_else(|e| panic!("bad fixture: {e}"));
    assert!(decl.is_module);
    assert!(!decl.is_serializable);
    let desc = lower(&decl);
    assert_eq!(desc.dependencies(), ["Bitmap"]);
    assert_eq!(desc.implementations()[0].dispatch.max_arity(), 2);
}

fn lower_params(params: Vec<ParameterDecl>) -> Result<ClassDescriptor, DescriptorError> {
    lower_class(&ClassDecl {
        methods: vec![method("set", "Set", vec![params])],
        ..class("Sprite")
    })
}

#[test]
fn test_duplicate_parameter_is_rejected() {
    assert_eq!(
        lower_params(vec![param("int32_t", "x"), param("float", "x")]),
        Err(DescriptorError::DuplicateParameter {
            class: "Sprite".into(),
            func: "Set".into(),
            param: "x".into(),
        })
    );
}

#[test]
fn test_generated_local_names_are_reserved() {
    for name in ["item", "i", "self_obj", "exception_state", "result_value", "ary"] {
        assert_eq!(
            lower_params(vec![param("int32_t", name)]),
            Err(DescriptorError::ReservedParameter {
                class: "Sprite".into(),
                func: "Set".into(),
                param: name.into(),
            }),
            "`{name}` should be reserved"
        );
    }
}

#[test]
fn test_converted_local_names_are_reserved() {
    let handle = lower_params(vec![
        param("scoped_refptr<Font>", "font"),
        param("int32_t", "font_obj"),
    ]);
    assert!(matches!(
        handle,
        Err(DescriptorError::ReservedParameter { ref param, .. }) if param == "font_obj"
    ));

    let list = lower_params(vec![
        param("int32_t", "points_list"),
        param("std::vector<int32_t>", "points"),
    ]);
    assert!(matches!(
        list,
        Err(DescriptorError::ReservedParameter { ref param, .. }) if param == "points_list"
    ));
}

#[test]
fn test_suffixed_names_without_base_are_allowed() {
    let desc = lower(&ClassDecl {
        methods: vec![method(
            "set",
            "Set",
            vec![vec![param("int32_t", "item_count"), param("int32_t", "value_obj")]],
        )],
        ..class("Sprite")
    });
    assert_eq!(desc.implementations()[0].dispatch.max_arity(), 2);
}

#[test]
fn test_optional_list_defaults_to_empty() {
    let desc = lower(&ClassDecl {
        methods: vec![method(
            "load",
            "Load",
            vec![vec![ParameterDecl {
                optional: true,
                ..param("std::vector<std::string>", "names")
            }]],
        )],
        ..class("Archive")
    });
    let sig = &desc.implementations()[0].dispatch.overloads()[0];
    assert_eq!(sig.params[0].default_value.as_deref(), Some("{}"));
}

#[test]
fn test_optional_list_rejects_non_empty_default() {
    assert_eq!(
        lower_params(vec![optional("const std::vector<int32_t>&", "points", "{1, 2}")]),
        Err(DescriptorError::ListDefault {
            class: "Sprite".into(),
            func: "Set".into(),
            param: "points".into(),
        })
    );
}

#[test]
fn test_fallback_count_covers_every_position() {
    let mut mode = method("mode=", "SetMode", vec![vec![param("BlendMode", "mode")]]);
    mode.return_type = "Handle".into();
    let decl = ClassDecl {
        attributes: vec![AttributeDecl {
            name: "blend".into(),
            func: "Blend".into(),
            ty: "BlendType".into(),
            is_static: false,
        }],
        methods: vec![
            mode,
            method("update", "Update", vec![vec![param("int32_t", "frames")]]),
        ],
        ..class("Sprite")
    };
    assert_eq!(lower(&decl).fallback_count(), 3);
}
