use super::*;
use crate::config::BindingConfig;
use crate::fixtures::{attribute, class, lowered, method, module, param, static_method};
use mri_ir::ClassDecl;
use pretty_assertions::assert_eq;

fn declaration_for(decl: &ClassDecl) -> String {
    let class = lowered(decl);
    let config = BindingConfig::default();
    emit_declaration(&class, &BindingNames::new(class.name(), &config))
}

#[test]
fn test_module_registration() {
    let decl = ClassDecl {
        attributes: vec![attribute("frame_rate", "FrameRate", "int32_t", true)],
        methods: vec![static_method(
            "add",
            "Add",
            "int32_t",
            vec![vec![param("int32_t", "a"), param("int32_t", "b")]],
        )],
        ..module("Calc")
    };
    assert_eq!(
        declaration_for(&decl),
        "\
void InitCalcBinding() {
  VALUE klass = rb_define_module(\"Calc\");

  MRI_DECLARE_MODULE_ATTRIBUTE(klass, \"frame_rate\", Calc, FrameRate);

  MriDefineModuleFunction(klass, \"add\", Calc_Add);
}
"
    );
}

#[test]
fn test_class_registration() {
    let decl = ClassDecl {
        is_serializable: true,
        attributes: vec![
            attribute("font", "Font", "scoped_refptr<Font>", false),
            attribute("default_font", "DefaultFont", "scoped_refptr<Font>", true),
        ],
        methods: vec![
            static_method(
                "initialize",
                "New",
                "scoped_refptr<Bitmap>",
                vec![vec![param("const std::string&", "filename")]],
            ),
            method("dispose", "Dispose", "void", vec![vec![]]),
            static_method("from_file", "FromFile", "scoped_refptr<Bitmap>", vec![vec![]]),
        ],
        ..class("Bitmap")
    };
    assert_eq!(
        declaration_for(&decl),
        "\
void InitBitmapBinding() {
  VALUE klass = rb_define_class(\"Bitmap\", rb_cObject);
  rb_define_alloc_func(klass, MriClassAllocate<&kBitmapDataType>);
  MriDefineMethod(klass, \"engine_id\", MriGetEngineID);
  MRI_DECLARE_OBJECT_COMPARE(Bitmap);

  MriInitSerializableBinding<content::Bitmap>(klass);

  MRI_DECLARE_ATTRIBUTE(klass, \"font\", Bitmap, Font);
  MRI_DECLARE_CLASS_ATTRIBUTE(klass, \"default_font\", Bitmap, DefaultFont);

  MriDefineMethod(klass, \"initialize\", Bitmap_New);
  MriDefineMethod(klass, \"dispose\", Bitmap_Dispose);
  MriDefineClassMethod(klass, \"from_file\", Bitmap_FromFile);
}
"
    );
}

#[test]
fn test_every_alias_is_registered_once() {
    let other = || vec![vec![param("scoped_refptr<Color>", "other")]];
    let decl = ClassDecl {
        methods: vec![
            method("==", "IsEqual", "bool", other()),
            method("eql?", "IsEqual", "bool", other()),
            method("==", "IsEqual", "bool", other()),
        ],
        ..class("Color")
    };
    let out = declaration_for(&decl);
    assert_eq!(out.matches("\"==\"").count(), 1);
    assert_eq!(out.matches("\"eql?\"").count(), 1);
    assert_eq!(out.matches("Color_IsEqual").count(), 2);
}

#[test]
fn test_copy_hook_is_instance_level() {
    let decl = ClassDecl {
        methods: vec![static_method(
            "initialize_copy",
            "Copy",
            "scoped_refptr<Rect>",
            vec![vec![param("scoped_refptr<Rect>", "other")]],
        )],
        ..class("Rect")
    };
    assert!(declaration_for(&decl)
        .contains("MriDefineMethod(klass, \"initialize_copy\", Rect_Copy);"));
}

#[test]
fn test_empty_class_has_no_member_sections() {
    assert_eq!(
        declaration_for(&module("Input")),
        "void InitInputBinding() {\n  VALUE klass = rb_define_module(\"Input\");\n}\n"
    );
}
