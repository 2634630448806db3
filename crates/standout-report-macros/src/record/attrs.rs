//! Parsing of `#[report(...)]` field attributes.

use syn::{
    parse::{Parse, ParseStream},
    punctuated::Punctuated,
    spanned::Spanned,
    Attribute, Error, Expr, ExprLit, Lit, Meta, MetaNameValue, Result, Token,
};

/// Field-level attributes from `#[report(...)]`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportAttr {
    /// Leave the field out of the record's field table.
    pub skip: bool,
    /// Lookup name (default: field name).
    pub rename: Option<String>,
    /// Column title (default: lookup name).
    pub title: Option<String>,
    pub description: Option<String>,
}

fn string_value(nv: &MetaNameValue, key: &str) -> Result<String> {
    match &nv.value {
        Expr::Lit(ExprLit {
            lit: Lit::Str(s), ..
        }) => Ok(s.value()),
        other => Err(Error::new(
            other.span(),
            format!("{} must be a string literal", key),
        )),
    }
}

impl Parse for ReportAttr {
    fn parse(input: ParseStream) -> Result<Self> {
        let mut attr = ReportAttr::default();

        let content: Punctuated<Meta, Token![,]> = Punctuated::parse_terminated(input)?;

        for meta in content {
            match &meta {
                Meta::Path(p) if p.is_ident("skip") => attr.skip = true,

                Meta::NameValue(nv) => {
                    let slot = if nv.path.is_ident("rename") {
                        &mut attr.rename
                    } else if nv.path.is_ident("title") {
                        &mut attr.title
                    } else if nv.path.is_ident("description") {
                        &mut attr.description
                    } else {
                        return Err(Error::new(
                            nv.path.span(),
                            "unknown attribute. Expected: rename, title or description",
                        ));
                    };
                    let key = nv
                        .path
                        .get_ident()
                        .map(|i| i.to_string())
                        .unwrap_or_default();
                    *slot = Some(string_value(nv, &key)?);
                }

                _ => {
                    return Err(Error::new(
                        meta.span(),
                        "unknown report attribute. Expected: skip, rename = \"...\", title = \"...\", or description = \"...\"",
                    ));
                }
            }
        }

        Ok(attr)
    }
}

/// Extract `#[report(...)]` attributes from a field's attributes.
pub fn parse_report_attrs(attrs: &[Attribute]) -> Result<ReportAttr> {
    for attr in attrs {
        if attr.path().is_ident("report") {
            return attr.parse_args::<ReportAttr>();
        }
    }
    Ok(ReportAttr::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_report(tokens: &str) -> Result<ReportAttr> {
        syn::parse_str::<ReportAttr>(tokens)
    }

    #[test]
    fn test_report_skip() {
        let attr = parse_report("skip").unwrap();
        assert!(attr.skip);
        assert_eq!(attr.rename, None);
    }

    #[test]
    fn test_report_all_keys() {
        let attr = parse_report(
            r#"rename = "pts", title = "Points", description = "Season total""#,
        )
        .unwrap();
        assert!(!attr.skip);
        assert_eq!(attr.rename.as_deref(), Some("pts"));
        assert_eq!(attr.title.as_deref(), Some("Points"));
        assert_eq!(attr.description.as_deref(), Some("Season total"));
    }

    #[test]
    fn test_report_empty() {
        assert_eq!(parse_report("").unwrap(), ReportAttr::default());
    }

    #[test]
    fn test_report_unknown_key() {
        let err = parse_report(r#"colour = "red""#).unwrap_err();
        assert!(err.to_string().contains("unknown attribute"));
    }

    #[test]
    fn test_report_unknown_flag() {
        let err = parse_report("hidden").unwrap_err();
        assert!(err.to_string().contains("unknown report attribute"));
    }

    #[test]
    fn test_report_non_string_value() {
        let err = parse_report("title = 3").unwrap_err();
        assert!(err.to_string().contains("title must be a string literal"));
    }

    #[test]
    fn test_attrs_from_field() {
        let item: syn::ItemStruct = syn::parse_quote! {
            struct Player {
                #[doc = "ignored"]
                #[report(title = "Name")]
                name: String,
            }
        };
        let field = item.fields.iter().next().unwrap();
        let attr = parse_report_attrs(&field.attrs).unwrap();
        assert_eq!(attr.title.as_deref(), Some("Name"));
    }
}
