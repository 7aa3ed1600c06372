//! Derive macros for saga-todo
//!
//! Every remote operation is modelled as three actions: the intent that
//! starts it and the success and failure actions that complete it. This
//! crate generates the classification helpers for such action enums.
//!
//! # Available Macros
//!
//! - `#[derive(Action)]` - Generates helpers for request/success/failure action enums
//!
//! # Example
//!
//! ```ignore
//! use saga_todo_macros::Action;
//!
//! #[derive(Action, Clone, Debug)]
//! enum TodoAction {
//!     #[intent]
//!     FetchRequest,
//!
//!     #[success]
//!     FetchSuccess(Vec<Todo>),
//!
//!     #[failure]
//!     FetchFailure(String),
//! }
//!
//! // Generated methods:
//! assert!(TodoAction::FetchRequest.is_intent());
//! assert!(TodoAction::FetchFailure("boom".into()).is_completion());
//! assert_eq!(TodoAction::FetchRequest.name(), "FetchRequest");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{parse_macro_input, Attribute, Data, DeriveInput, Fields, Variant};

/// Lifecycle position of an action variant
#[derive(Clone, Copy, PartialEq, Eq)]
enum Kind {
    Intent,
    Success,
    Failure,
}

impl Kind {
    const ALL: [(Self, &'static str); 3] = [
        (Self::Intent, "intent"),
        (Self::Success, "success"),
        (Self::Failure, "failure"),
    ];
}

/// Derive macro for Action enums
///
/// Generates helper methods for action enums:
/// - `is_intent()` - Returns true if this variant starts an operation
/// - `is_success()` - Returns true if this variant completes an operation successfully
/// - `is_failure()` - Returns true if this variant completes an operation with an error
/// - `is_completion()` - Returns true for success or failure variants
/// - `name()` - Returns the variant name, for logging
///
/// # Attributes
///
/// - `#[intent]` - Mark a variant as an intent
/// - `#[success]` - Mark a variant as a successful completion
/// - `#[failure]` - Mark a variant as a failed completion
///
/// Unmarked variants are allowed and return false from every predicate.
///
/// # Panics
///
/// This macro will produce a compile error (not a runtime panic) if:
/// - Applied to a non-enum type
/// - A variant carries more than one of the attributes above
///
/// # Example
///
/// ```ignore
/// #[derive(Action, Clone, Debug)]
/// enum TodoAction {
///     #[intent]
///     DeleteRequest(TodoId),
///
///     #[success]
///     DeleteSuccess(TodoId),
///
///     #[failure]
///     DeleteFailure(String),
/// }
///
/// let action = TodoAction::DeleteSuccess(TodoId::new(1));
/// assert!(action.is_completion());
/// assert!(!action.is_failure());
/// ```
#[proc_macro_derive(Action, attributes(intent, success, failure))]
pub fn derive_action(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let name = &input.ident;

    let Data::Enum(data_enum) = &input.data else {
        return syn::Error::new_spanned(input, "#[derive(Action)] can only be used on enums")
            .to_compile_error()
            .into();
    };

    let mut intent_arms = Vec::new();
    let mut success_arms = Vec::new();
    let mut failure_arms = Vec::new();
    let mut name_arms = Vec::new();

    for variant in &data_enum.variants {
        let kinds: Vec<Kind> = Kind::ALL
            .iter()
            .filter(|(_, attr)| has_attribute(&variant.attrs, attr))
            .map(|(kind, _)| *kind)
            .collect();

        if kinds.len() > 1 {
            return syn::Error::new_spanned(
                variant,
                "Variant can only be one of #[intent], #[success] or #[failure]",
            )
            .to_compile_error()
            .into();
        }

        let pattern = variant_pattern(variant);
        match kinds.first() {
            Some(Kind::Intent) => intent_arms.push(quote! { #pattern => true, }),
            Some(Kind::Success) => success_arms.push(quote! { #pattern => true, }),
            Some(Kind::Failure) => failure_arms.push(quote! { #pattern => true, }),
            None => {},
        }

        let variant_name = variant.ident.to_string();
        name_arms.push(quote! { #pattern => #variant_name, });
    }

    let expanded = quote! {
        impl #name {
            /// Returns true if this action starts a remote operation
            #[must_use]
            #[allow(unreachable_patterns)]
            pub const fn is_intent(&self) -> bool {
                match self {
                    #(#intent_arms)*
                    _ => false,
                }
            }

            /// Returns true if this action reports a successful remote operation
            #[must_use]
            #[allow(unreachable_patterns)]
            pub const fn is_success(&self) -> bool {
                match self {
                    #(#success_arms)*
                    _ => false,
                }
            }

            /// Returns true if this action reports a failed remote operation
            #[must_use]
            #[allow(unreachable_patterns)]
            pub const fn is_failure(&self) -> bool {
                match self {
                    #(#failure_arms)*
                    _ => false,
                }
            }

            /// Returns true if this action completes a remote operation
            #[must_use]
            pub const fn is_completion(&self) -> bool {
                self.is_success() || self.is_failure()
            }

            /// Returns the variant name
            #[must_use]
            pub const fn name(&self) -> &'static str {
                match self {
                    #(#name_arms)*
                }
            }
        }
    };

    TokenStream::from(expanded)
}

/// Match pattern for a variant that ignores its fields
fn variant_pattern(variant: &Variant) -> TokenStream2 {
    let ident = &variant.ident;
    match variant.fields {
        Fields::Named(_) => quote! { Self::#ident { .. } },
        Fields::Unnamed(_) => quote! { Self::#ident(..) },
        Fields::Unit => quote! { Self::#ident },
    }
}

/// Helper function to check if an attribute list contains a specific attribute
fn has_attribute(attrs: &[Attribute], name: &str) -> bool {
    attrs.iter().any(|attr| attr.path().is_ident(name))
}
