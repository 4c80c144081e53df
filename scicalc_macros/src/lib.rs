use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{parse_macro_input, spanned::Spanned, FnArg, Ident, ItemFn, PatType, Type};

/// How a single parameter of a `#[calc_fn]` function is filled from the argument slice.
enum Param {
    /// `x: f64`, taken positionally.
    Scalar(Ident),
    /// `values: &[f64]`, receives every argument.
    Rest(Ident),
}

fn unsupported(span: proc_macro2::Span, fn_name: &Ident) -> syn::Error {
    syn::Error::new(
        span,
        format!(
            "unsupported parameter in `{}`: expected `f64` or a single `&[f64]`",
            fn_name
        ),
    )
}

fn is_f64(ty: &Type) -> bool {
    matches!(ty, Type::Path(type_path) if type_path.path.is_ident("f64"))
}

fn is_f64_slice(ty: &Type) -> bool {
    match ty {
        Type::Reference(reference) => match &*reference.elem {
            Type::Slice(slice) => is_f64(&slice.elem),
            _ => false,
        },
        _ => false,
    }
}

fn collect_params(input: &ItemFn) -> syn::Result<Vec<Param>> {
    let fn_name = &input.sig.ident;
    let mut params = Vec::new();

    for arg in input.sig.inputs.iter() {
        let FnArg::Typed(PatType { pat, ty, .. }) = arg else {
            return Err(unsupported(arg.span(), fn_name));
        };
        let syn::Pat::Ident(ref pat_ident) = **pat else {
            return Err(unsupported(pat.span(), fn_name));
        };
        let name = pat_ident.ident.clone();

        if is_f64(ty) {
            params.push(Param::Scalar(name));
        } else if is_f64_slice(ty) {
            params.push(Param::Rest(name));
        } else {
            return Err(unsupported(ty.span(), fn_name));
        }
    }

    let rest_count = params.iter().filter(|p| matches!(p, Param::Rest(_))).count();
    if rest_count > 0 && params.len() != 1 {
        return Err(syn::Error::new(
            input.sig.inputs.span(),
            format!(
                "`{}` mixes a `&[f64]` parameter with other parameters",
                fn_name
            ),
        ));
    }

    Ok(params)
}

fn expand(input: ItemFn) -> syn::Result<TokenStream2> {
    let params = collect_params(&input)?;
    let attrs = &input.attrs;
    let fn_name = &input.sig.ident;
    let fn_name_str = fn_name.to_string();
    let fn_output = &input.sig.output;
    let fn_body = &input.block;

    let bindings = match params.as_slice() {
        [Param::Rest(name)] => quote! {
            let #name: &[f64] = args;
        },
        _ => {
            let expected = params.len();
            let extractions = params.iter().enumerate().map(|(i, param)| match param {
                Param::Scalar(name) => quote! { let #name = args[#i]; },
                Param::Rest(_) => quote! {},
            });
            quote! {
                if args.len() != #expected {
                    return Err(crate::error::FunctionError::Arity {
                        function: #fn_name_str.to_string(),
                        expected: crate::functions::Arity::Exact(#expected),
                        given: args.len(),
                    });
                }
                #(#extractions)*
            }
        }
    };

    Ok(quote! {
        #(#attrs)*
        pub fn #fn_name(args: &[f64]) #fn_output {
            #bindings
            #fn_body
        }
    })
}

/// Turns a plain numeric function into a registry entry point.
///
/// `fn sqrt(x: f64) -> Result<f64, FunctionError>` becomes
/// `pub fn sqrt(args: &[f64]) -> Result<f64, FunctionError>` that checks the
/// argument count before binding `x`. A lone `&[f64]` parameter receives the
/// whole argument slice unchecked.
#[proc_macro_attribute]
pub fn calc_fn(_attr: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemFn);
    match expand(input) {
        Ok(tokens) => TokenStream::from(tokens),
        Err(err) => TokenStream::from(err.to_compile_error()),
    }
}
