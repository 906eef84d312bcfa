//! 表单 HTML 描画

use std::fmt::{self, Write};

use super::attribute::FieldKind;
use super::builder::FormBuilder;
use super::field::FormField;
use super::value::FieldValue;
use super::CSRF_TOKEN_FIELD;
use crate::services::{NoTranslation, Translator};
use crate::utils::escape_html;

impl FormBuilder {
    /// 描画为 HTML，标签、占位符和按钮文本经过翻译
    pub fn render_html(&self, translator: &dyn Translator) -> String {
        let mut html = String::new();
        self.write_html(&mut html, translator).ok();
        html
    }

    fn write_html(&self, out: &mut String, translator: &dyn Translator) -> fmt::Result {
        let attr = &self.attribute;
        write!(
            out,
            r#"<form name="{}" action="{}" method="{}" class="form-horizontal">"#,
            escape_html(&attr.name),
            escape_html(&attr.action),
            escape_html(&attr.method),
        )?;

        if self.csrf_required()
            && let Some(token) = self.csrf_token()
        {
            write!(
                out,
                r#"<input type="hidden" name="{}" value="{}"/>"#,
                CSRF_TOKEN_FIELD,
                escape_html(token)
            )?;
        }

        for field in self.fields() {
            write_field(out, &attr.name, field, translator)?;
        }

        write!(
            out,
            r#"<button type="submit" class="btn btn-primary">{}</button></form>"#,
            escape_html(&translator.translate(&attr.submit_button_text))
        )
    }
}

fn write_field(
    out: &mut String,
    form_name: &str,
    field: &FormField,
    translator: &dyn Translator,
) -> fmt::Result {
    let name = escape_html(field.name());
    let id = format!("{}-{}", escape_html(form_name), name);
    let value = escape_html(&field.display_value().to_string());
    let placeholder = field
        .attribute
        .placeholder
        .as_deref()
        .map(|p| format!(r#" placeholder="{}""#, escape_html(&translator.translate(p))))
        .unwrap_or_default();
    let required = if field.is_required() { " required" } else { "" };

    if let FieldKind::Hidden = field.attribute.kind {
        return write!(out, r#"<input type="hidden" name="{}" value="{}"/>"#, name, value);
    }

    write!(
        out,
        r#"<div class="form-group"><label for="{}">{}</label>"#,
        id,
        escape_html(&translator.translate(field.name()))
    )?;

    match &field.attribute.kind {
        FieldKind::TextBox => write!(
            out,
            r#"<input type="text" id="{id}" name="{name}" value="{value}"{placeholder}{required}/>"#
        )?,
        FieldKind::Password => write!(
            out,
            r#"<input type="password" id="{id}" name="{name}"{placeholder}{required}/>"#
        )?,
        FieldKind::TextArea { rows } => write!(
            out,
            r#"<textarea id="{id}" name="{name}" rows="{rows}"{placeholder}{required}>{value}</textarea>"#
        )?,
        FieldKind::Label => write!(out, r#"<span id="{id}">{value}</span>"#)?,
        FieldKind::CheckBox => {
            let checked = if matches!(field.value, FieldValue::Bool(true)) {
                " checked"
            } else {
                ""
            };
            write!(out, r#"<input type="checkbox" id="{id}" name="{name}"{checked}/>"#)?
        }
        FieldKind::DropdownList { .. } => {
            write!(out, r#"<select id="{id}" name="{name}"{required}>"#)?;
            for item in &field.options {
                let selected = if field.value.to_string() == item.value {
                    " selected"
                } else {
                    ""
                };
                write!(
                    out,
                    r#"<option value="{}"{}>{}</option>"#,
                    escape_html(&item.value),
                    selected,
                    escape_html(&translator.translate(&item.name))
                )?;
            }
            write!(out, "</select>")?
        }
        FieldKind::Captcha { key } => write!(
            out,
            r#"<input type="text" id="{id}" name="{name}" data-captcha-key="{}" autocomplete="off"{placeholder}{required}/>"#,
            escape_html(key)
        )?,
        FieldKind::Hidden => {}
    }

    write!(out, "</div>")
}

impl fmt::Display for FormBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render_html(&NoTranslation))
    }
}
