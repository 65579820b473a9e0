use crate::macros::error::{derived_trait_names, single_generic};
use proc_macro2::TokenStream;
use quote::quote;
use syn::parse::Parser;
use syn::{Attribute, Field, Fields, ItemStruct, Meta, Path, parse_quote};

/// Field name reserved for the discriminator literal.
const DISCRIMINATOR: &str = "category";

struct EntityArgs {
    class: Path,
    tagged: bool,
}

/// Expands the `#[entity_model]` attribute macro.
pub fn expand_entity_model(args: TokenStream, mut input: ItemStruct) -> TokenStream {
    let EntityArgs { class, tagged } = match parse_entity_args(args) {
        Ok(args) => args,
        Err(err) => return err.to_compile_error(),
    };
    if !input.generics.params.is_empty() {
        return syn::Error::new_spanned(&input.generics, "entity_model does not support generics")
            .to_compile_error();
    }

    let name = input.ident.clone();
    let Fields::Named(fields) = &mut input.fields else {
        return syn::Error::new_spanned(&input.ident, "entity_model requires named fields")
            .to_compile_error();
    };
    if let Some(reserved) = fields.named.iter().find(|f| has_ident(f, DISCRIMINATOR)) {
        return syn::Error::new_spanned(
            reserved,
            "`category` is reserved for the discriminator and is generated by entity_model",
        )
        .to_compile_error();
    }

    let has_id = fields.named.iter().any(|f| has_ident(f, "id"));
    let has_name = fields.named.iter().any(|f| has_ident(f, "name"));

    for field in &mut fields.named {
        if field.attrs.iter().any(|attr| attr.path().is_ident("builder")) {
            continue;
        }
        field.attrs.push(builder_attr(field));
    }

    if tagged {
        let discriminator = Field::parse_named.parse2(quote! {
            #[builder(default, setter(skip))]
            category: ::roster_model::Discriminator<#name>
        });
        match discriminator {
            Ok(field) => fields.named.push(field),
            Err(err) => return err.to_compile_error(),
        }
    }

    let derive_attr = derive_attr(&input.attrs);
    let serde_attr = match serde_attr(&input.attrs) {
        Ok(attr) => attr,
        Err(err) => return err.to_compile_error(),
    };
    let entity_impl = quote! {
        #[automatically_derived]
        impl ::roster_model::Entity for #name {
            const CLASS: &'static ::roster_model::ClassDecl = &#class;
        }
    };
    let tagged_impl = if tagged {
        quote! {
            #[automatically_derived]
            impl ::roster_model::Tagged for #name {
                const CATEGORY: &'static str = ::roster_model::schema::category_of(&#class);
            }
        }
    } else {
        quote! {}
    };
    let named_impl = if tagged && has_id && has_name {
        quote! {
            #[automatically_derived]
            impl ::roster_model::Named for #name {
                fn id(&self) -> Option<&str> {
                    self.id.as_deref()
                }

                fn name(&self) -> Option<&str> {
                    self.name.as_deref()
                }

                fn category(&self) -> &'static str {
                    <Self as ::roster_model::Tagged>::CATEGORY
                }
            }
        }
    } else {
        quote! {}
    };

    quote! {
        #derive_attr
        #serde_attr
        #input

        #entity_impl
        #tagged_impl
        #named_impl
    }
}

fn parse_entity_args(args: TokenStream) -> syn::Result<EntityArgs> {
    let parser = syn::punctuated::Punctuated::<Meta, syn::Token![,]>::parse_terminated;
    let metas = parser.parse2(args)?;

    let mut class: Option<Path> = None;
    let mut tagged = true;

    for meta in metas {
        match meta {
            Meta::NameValue(name_value) if name_value.path.is_ident("class") => {
                if class.is_some() {
                    return Err(syn::Error::new_spanned(name_value, "Duplicate `class` argument"));
                }
                let syn::Expr::Path(expr) = &name_value.value else {
                    return Err(syn::Error::new_spanned(
                        &name_value.value,
                        "`class` must be a path to a `ClassDecl` constant",
                    ));
                };
                class = Some(expr.path.clone());
            },
            Meta::Path(path) if path.is_ident("untagged") => tagged = false,
            other => {
                return Err(syn::Error::new_spanned(
                    other,
                    "Unsupported argument; expected `class = ...` or `untagged`",
                ));
            },
        }
    }

    let class = class.ok_or_else(|| {
        syn::Error::new(
            proc_macro2::Span::call_site(),
            "entity_model requires `class = <ClassDecl constant>`",
        )
    })?;

    Ok(EntityArgs { class, tagged })
}

fn has_ident(field: &Field, name: &str) -> bool {
    field.ident.as_ref().is_some_and(|ident| ident == name)
}

fn builder_attr(field: &Field) -> Attribute {
    if single_generic(&field.ty, "Option").is_some() {
        parse_quote!(#[builder(default, setter(into, strip_option))])
    } else {
        parse_quote!(#[builder(default, setter(into))])
    }
}

fn derive_attr(attrs: &[Attribute]) -> TokenStream {
    let present = derived_trait_names(attrs);
    let wanted = [
        ("Debug", quote! { Debug }),
        ("Clone", quote! { Clone }),
        ("PartialEq", quote! { PartialEq }),
        ("Eq", quote! { Eq }),
        ("Default", quote! { Default }),
        ("Serialize", quote! { ::serde::Serialize }),
        ("Deserialize", quote! { ::serde::Deserialize }),
        ("TypedBuilder", quote! { ::typed_builder::TypedBuilder }),
    ];
    let tokens: Vec<_> = wanted
        .into_iter()
        .filter(|(ident, _)| !present.contains(*ident))
        .map(|(_, tokens)| tokens)
        .collect();

    if tokens.is_empty() { quote! {} } else { quote! { #[derive(#(#tokens),*)] } }
}

fn serde_attr(attrs: &[Attribute]) -> syn::Result<TokenStream> {
    let mut deny_unknown_fields = false;
    let mut default = false;

    for attr in attrs.iter().filter(|attr| attr.path().is_ident("serde")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("deny_unknown_fields") {
                deny_unknown_fields = true;
            } else if meta.path.is_ident("default") {
                default = true;
            } else if meta.path.is_ident("tag") || meta.path.is_ident("untagged") {
                return Err(meta.error("entity models carry their own discriminator"));
            }
            if meta.input.peek(syn::Token![=]) {
                let _ = meta.value()?.parse::<syn::Expr>()?;
            }
            Ok(())
        })?;
    }

    let mut tokens = Vec::new();
    if !deny_unknown_fields {
        tokens.push(quote! { deny_unknown_fields });
    }
    if !default {
        tokens.push(quote! { default });
    }

    Ok(if tokens.is_empty() { quote! {} } else { quote! { #[serde(#(#tokens),*)] } })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expand(args: TokenStream, input: ItemStruct) -> String {
        expand_entity_model(args, input).to_string()
    }

    #[test]
    fn tagged_struct_gets_discriminator_and_traits() {
        let input: ItemStruct = parse_quote! {
            pub struct Person {
                pub id: Option<String>,
                pub name: Option<String>,
            }
        };
        let expanded = expand(quote!(class = decl::PERSON), input);

        assert!(expanded.contains("Discriminator < Person >"));
        assert!(expanded.contains("impl :: roster_model :: Tagged for Person"));
        assert!(expanded.contains("impl :: roster_model :: Named for Person"));
        assert!(expanded.contains("deny_unknown_fields"));
        assert!(expanded.contains("strip_option"));
    }

    #[test]
    fn untagged_struct_has_no_discriminator() {
        let input: ItemStruct = parse_quote! {
            pub struct Container {
                pub people: Vec<String>,
            }
        };
        let expanded = expand(quote!(class = decl::CONTAINER, untagged), input);

        assert!(!expanded.contains("Discriminator"));
        assert!(!expanded.contains("Tagged for Container"));
        assert!(expanded.contains("impl :: roster_model :: Entity for Container"));
    }

    #[test]
    fn missing_class_and_reserved_field_are_errors() {
        let plain: ItemStruct = parse_quote! { pub struct Animal { pub id: Option<String> } };
        assert!(expand(quote!(untagged), plain).contains("compile_error"));

        let reserved: ItemStruct = parse_quote! { pub struct Plant { pub category: String } };
        assert!(expand(quote!(class = decl::PLANT), reserved).contains("compile_error"));
    }

    #[test]
    fn existing_derives_are_not_repeated() {
        let input: ItemStruct = parse_quote! {
            #[derive(Debug, Clone)]
            pub struct Fungi { pub id: Option<String> }
        };
        let expanded = expand(quote!(class = decl::FUNGI), input);

        assert_eq!(expanded.matches("Debug").count(), 1);
        assert!(expanded.contains("TypedBuilder"));
    }
}
