//! The `#[component]` attribute.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::{format_ident, quote};
use syn::{
    FnArg, Ident, ImplItem, ImplItemFn, ItemImpl, LitStr, ReturnType, Token, Type, Visibility,
    parse::{Parse, ParseStream},
    parse_macro_input,
};

/// Arguments for the `#[component]` macro.
pub(crate) struct ComponentArgs {
    pub name: Option<LitStr>,
}

impl Parse for ComponentArgs {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let mut name = None;

        while !input.is_empty() {
            let ident: Ident = input.parse()?;
            input.parse::<Token![=]>()?;

            match ident.to_string().as_str() {
                "name" => name = Some(input.parse()?),
                other => {
                    return Err(syn::Error::new(
                        ident.span(),
                        format!("unknown attribute: {}", other),
                    ));
                }
            }

            if input.peek(Token![,]) {
                input.parse::<Token![,]>()?;
            }
        }

        Ok(ComponentArgs { name })
    }
}

/// Implementation of the `#[component]` macro.
pub fn component_impl(attr: TokenStream, item: TokenStream) -> TokenStream {
    let args = parse_macro_input!(attr as ComponentArgs);
    let input = parse_macro_input!(item as ItemImpl);

    match expand(&args, &input) {
        Ok(expanded) => expanded.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn expand(args: &ComponentArgs, input: &ItemImpl) -> syn::Result<TokenStream2> {
    if let Some((_, path, _)) = &input.trait_ {
        return Err(syn::Error::new_spanned(
            path,
            "#[component] must be applied to an inherent impl block",
        ));
    }

    let self_ty = &input.self_ty;
    let (impl_generics, _, where_clause) = input.generics.split_for_impl();

    let methods: Vec<&ImplItemFn> = input
        .items
        .iter()
        .filter_map(|item| match item {
            ImplItem::Fn(method) if is_exposed(method) => Some(method),
            _ => None,
        })
        .collect();

    let names: Vec<String> = methods.iter().map(|m| m.sig.ident.to_string()).collect();
    let arms = methods
        .iter()
        .copied()
        .map(invoke_arm)
        .collect::<syn::Result<Vec<_>>>()?;

    let component_name = match &args.name {
        Some(name) => quote! { #name },
        None => quote! { ::core::stringify!(#self_ty) },
    };

    Ok(quote! {
        #input

        impl #impl_generics ::weir::Component for #self_ty #where_clause {
            fn component_name(&self) -> &'static str {
                #component_name
            }

            fn method_names(&self) -> ::std::vec::Vec<&str> {
                ::std::vec![#(#names),*]
            }

            fn responds_to(&self, method: &str) -> bool {
                [#(#names),*].contains(&method)
            }

            #[allow(unused_variables)]
            fn invoke(
                &self,
                method: &str,
                args: ::weir::Args,
            ) -> ::core::result::Result<::weir::Value, ::weir::BoxError> {
                match method {
                    #(#arms)*
                    other => ::core::result::Result::Err(::std::format!(
                        "`{}` has no method `{}`",
                        ::weir::Component::component_name(self),
                        other
                    ).into()),
                }
            }
        }
    })
}

/// Public methods with a `&self` receiver.
fn is_exposed(method: &ImplItemFn) -> bool {
    let public = matches!(method.vis, Visibility::Public(_));
    let by_ref = matches!(
        method.sig.inputs.first(),
        Some(FnArg::Receiver(receiver)) if receiver.reference.is_some() && receiver.mutability.is_none()
    );
    public && by_ref
}

fn invoke_arm(method: &ImplItemFn) -> syn::Result<TokenStream2> {
    let ident = &method.sig.ident;
    let name = ident.to_string();

    if let Some(asyncness) = &method.sig.asyncness {
        return Err(syn::Error::new_spanned(
            asyncness,
            "component methods are invoked synchronously and cannot be async",
        ));
    }

    let mut bindings = Vec::new();
    let mut idents = Vec::new();
    for (index, arg) in method.sig.inputs.iter().skip(1).enumerate() {
        let FnArg::Typed(pat_type) = arg else {
            continue;
        };
        let ty = &pat_type.ty;
        if let Type::Reference(reference) = &**ty {
            return Err(syn::Error::new_spanned(
                reference,
                "component method arguments must be owned; use `String` or `Arc<T>`",
            ));
        }
        let binding = format_ident!("__arg{}", index);
        bindings.push(quote! {
            let #binding: #ty = args.extract::<#ty>(#index)?;
        });
        idents.push(binding);
    }
    let arity = idents.len();

    let call = quote! { self.#ident(#(#idents),*) };
    let outcome = match &method.sig.output {
        ReturnType::Default => quote! {
            #call;
            ::core::result::Result::Ok(::weir::Value::unit())
        },
        ReturnType::Type(_, ty) if returns_result(ty) => quote! {
            #call
                .map(::weir::IntoValue::into_value)
                .map_err(::core::convert::Into::into)
        },
        ReturnType::Type(..) => quote! {
            ::core::result::Result::Ok(::weir::IntoValue::into_value(#call))
        },
    };

    Ok(quote! {
        #name => {
            args.expect_arity(#arity)?;
            #(#bindings)*
            #outcome
        }
    })
}

fn returns_result(ty: &Type) -> bool {
    match ty {
        Type::Path(path) => path
            .path
            .segments
            .last()
            .is_some_and(|segment| segment.ident == "Result" || segment.ident == "Outcome"),
        _ => false,
    }
}
