use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, DeriveInput, LitStr, Path};

/// Derive macro for the scene `Component` trait.
///
/// `#[component(name = "...")]` overrides the serialized name (defaults to
/// the type name). `#[component(on_added = "path::to::fn")]` names a
/// `fn(&mut Self, ViewportSize)` run when the component is attached to an
/// entity.
#[proc_macro_derive(Component, attributes(component))]
pub fn derive_component(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let mut component_name = name.to_string();
    let mut on_added: Option<Path> = None;
    for attr in &input.attrs {
        if !attr.path().is_ident("component") {
            continue;
        }
        let result = attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("name") {
                component_name = meta.value()?.parse::<LitStr>()?.value();
                Ok(())
            } else if meta.path.is_ident("on_added") {
                on_added = Some(meta.value()?.parse::<LitStr>()?.parse::<Path>()?);
                Ok(())
            } else {
                Err(meta.error("unsupported component attribute"))
            }
        });
        if let Err(e) = result {
            return e.to_compile_error().into();
        }
    }

    let on_added_impl = on_added.map(|hook| {
        quote! {
            fn on_added(&mut self, viewport: ::cobra_engine::scene::ViewportSize) {
                #hook(self, viewport)
            }
        }
    });

    let expanded = quote! {
        impl #impl_generics ::cobra_engine::scene::Component for #name #ty_generics #where_clause {
            fn component_name() -> &'static str {
                #component_name
            }

            #on_added_impl
        }
    };

    TokenStream::from(expanded)
}
