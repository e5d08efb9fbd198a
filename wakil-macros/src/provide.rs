//! Expansion of `#[provide]`.

use darling::ast::NestedMeta;
use darling::{Error, FromMeta};
use proc_macro2::TokenStream;
use quote::quote;
use syn::ext::IdentExt;
use syn::{FnArg, GenericArgument, ItemFn, Pat, PathArguments, ReturnType, Type};

#[derive(Debug, Default, FromMeta)]
struct ProvideArgs {
    /// Registers the provider under this name instead of the function's.
    #[darling(default)]
    name: Option<String>,
}

/// One declared parameter: its dependency name and how to bind it.
struct Parameter {
    name: String,
    binding: TokenStream,
}

pub(crate) fn expand(args: TokenStream, input: TokenStream) -> darling::Result<TokenStream> {
    let args = ProvideArgs::from_list(&NestedMeta::parse_meta_list(args)?)?;
    let func: ItemFn = syn::parse2(input)?;

    check_signature(&func)?;

    let fn_ident = &func.sig.ident;
    let name = args.name.unwrap_or_else(|| fn_ident.unraw().to_string());
    if name.is_empty() {
        return Err(Error::custom("provider name cannot be empty").with_span(&func.sig.ident));
    }

    let parameters = func
        .sig
        .inputs
        .iter()
        .map(parameter)
        .collect::<darling::Result<Vec<_>>>()?;
    let names = parameters.iter().map(|p| p.name.as_str());
    let bindings = parameters.iter().map(|p| &p.binding);

    let call = quote! { #fn_ident(#(#bindings),*) };
    let body = if returns_result(&func.sig.output) {
        quote! { #call.map_err(|e| ::wakil::WakilError::construction(#name, e)) }
    } else {
        quote! { ::core::result::Result::Ok(#call) }
    };

    Ok(quote! {
        #func

        const _: () = {
            fn __wakil_build() -> ::wakil::Thing {
                ::wakil::Thing::function(#name, &[#(#names),*], |__args: &::wakil::Arguments| {
                    #body
                })
            }

            ::wakil::__private::inventory::submit! {
                ::wakil::__private::Marked::new(::core::module_path!(), #name, __wakil_build)
            }
        };
    })
}

fn check_signature(func: &ItemFn) -> darling::Result<()> {
    let sig = &func.sig;

    if !sig.generics.params.is_empty() {
        return Err(Error::custom("#[provide] functions cannot be generic").with_span(&sig.generics));
    }
    if let Some(asyncness) = &sig.asyncness {
        return Err(Error::custom("#[provide] functions cannot be async").with_span(asyncness));
    }
    if let Some(variadic) = &sig.variadic {
        return Err(Error::custom("#[provide] functions cannot be variadic").with_span(variadic));
    }

    Ok(())
}

fn parameter(arg: &FnArg) -> darling::Result<Parameter> {
    let typed = match arg {
        FnArg::Typed(typed) => typed,
        FnArg::Receiver(receiver) => {
            return Err(
                Error::custom("#[provide] only supports free functions").with_span(receiver)
            );
        }
    };

    let Pat::Ident(pat) = typed.pat.as_ref() else {
        return Err(Error::custom("#[provide] parameters must be plain identifiers")
            .with_span(&typed.pat));
    };
    if pat.by_ref.is_some() || pat.subpat.is_some() {
        return Err(Error::custom("#[provide] parameters must be plain identifiers").with_span(pat));
    }

    let name = pat.ident.unraw().to_string();
    let binding = binding(&name, &typed.ty);
    Ok(Parameter { name, binding })
}

/// Expression extracting parameter `name` of type `ty` from `__args`.
fn binding(name: &str, ty: &Type) -> TokenStream {
    match arc_inner(ty) {
        Some(inner) => quote! { __args.get::<#inner>(#name)? },
        None => quote! { __args.cloned::<#ty>(#name)? },
    }
}

/// `T` if `ty` is spelled `Arc<T>` (with any path prefix).
fn arc_inner(ty: &Type) -> Option<&Type> {
    let Type::Path(path) = ty else {
        return None;
    };
    if path.qself.is_some() {
        return None;
    }

    let segment = path.path.segments.last()?;
    if segment.ident != "Arc" {
        return None;
    }

    let PathArguments::AngleBracketed(generics) = &segment.arguments else {
        return None;
    };
    if generics.args.len() != 1 {
        return None;
    }

    match generics.args.first()? {
        GenericArgument::Type(inner) => Some(inner),
        _ => None,
    }
}

fn returns_result(output: &ReturnType) -> bool {
    let ReturnType::Type(_, ty) = output else {
        return false;
    };
    let Type::Path(path) = ty.as_ref() else {
        return false;
    };
    path.path
        .segments
        .last()
        .is_some_and(|segment| segment.ident == "Result")
}
