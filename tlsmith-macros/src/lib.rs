extern crate proc_macro;

use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, Data, DeriveInput, Fields};

/// Implement `EncodeValue` for an enum.
///
/// The enum must have a `byte_value` method which returns the appropriate sized
/// primitive for each variant. `EncodeValue`, `Writer`, and `CodecError` must
/// be in scope at the derive site.
///
/// The generated implementation looks like the following.
/// ```ignore
/// impl EncodeValue for HandshakeType {
///     fn encode_to(&self, writer: &mut Writer) -> Result<(), CodecError> {
///         self.byte_value().encode_to(writer)
///     }
/// }
/// ```
#[proc_macro_derive(EncodeEnum)]
pub fn derive_encode_enum(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let enum_name = input.ident.clone();

    let Data::Enum(_) = input.data else {
        return syn::Error::new_spanned(input.ident, "EncodeEnum only supports enums")
            .to_compile_error()
            .into();
    };

    let output = quote! {
        impl EncodeValue for #enum_name {
            fn encode_to(&self, writer: &mut Writer) -> Result<(), CodecError> {
                self.byte_value().encode_to(writer)
            }
        }
    };

    output.into()
}

/// Implement `DecodeValue` for an enum.
///
/// The enum must derive `strum::EnumIter` and define a `byte_value()` method.
/// The actual implementation looks like the following:
/// ```ignore
/// impl DecodeValue for HandshakeType {
///     fn decode_from(reader: &mut Reader) -> Result<Self, CodecError> {
///         let value = DecodeValue::decode_from(reader)?;
///         match Self::iter().find(|e| e.byte_value() == value) {
///             Some(valid) => Ok(valid),
///             None => Err(CodecError::InvalidDiscriminant { .. }),
///         }
///     }
/// }
/// ```
#[proc_macro_derive(DecodeEnum)]
pub fn derive_decode_enum(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let enum_name = input.ident.clone();

    let Data::Enum(_) = input.data else {
        return syn::Error::new_spanned(input.ident, "DecodeEnum only supports enums")
            .to_compile_error()
            .into();
    };

    let output = quote! {
        impl DecodeValue for #enum_name {
            fn decode_from(reader: &mut Reader) -> Result<Self, CodecError> {
                let value = DecodeValue::decode_from(reader)?;
                match <Self as strum::IntoEnumIterator>::iter().find(|e| e.byte_value() == value) {
                    Some(valid) => Ok(valid),
                    None => Err(CodecError::InvalidDiscriminant {
                        type_name: std::any::type_name::<Self>(),
                        value: value.into(),
                    }),
                }
            }
        }
    };

    output.into()
}

/// Derive `DecodeValue` for a struct.
///
/// All of the members of the struct must also implement DecodeValue.
///
/// The resulting derivation looks like the following:
/// ```ignore
/// impl DecodeValue for HandshakeMessageHeader {
///     fn decode_from(reader: &mut Reader) -> Result<Self, CodecError> {
///         let message_type = DecodeValue::decode_from(reader)?;
///         let length = DecodeValue::decode_from(reader)?;
///
///         let header = Self {
///             message_type,
///             length,
///         };
///
///         Ok(header)
///     }
/// }
/// ```
#[proc_macro_derive(DecodeStruct)]
pub fn derive_decode_struct(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let struct_name = input.ident;

    let Data::Struct(data_struct) = input.data else {
        return syn::Error::new_spanned(&struct_name, "DecodeStruct only supports structs")
            .to_compile_error()
            .into();
    };

    let Fields::Named(fields_named) = data_struct.fields else {
        return syn::Error::new_spanned(&struct_name, "DecodeStruct requires named fields")
            .to_compile_error()
            .into();
    };

    let mut decode_stmts = Vec::new();
    let mut field_bindings = Vec::new();

    for field in &fields_named.named {
        if let Some(ident) = &field.ident {
            decode_stmts.push(quote! {
                let #ident = DecodeValue::decode_from(reader)?;
            });
            field_bindings.push(quote! { #ident });
        }
    }

    let output = quote! {
        impl DecodeValue for #struct_name {
            fn decode_from(reader: &mut Reader) -> Result<Self, CodecError> {
                #(#decode_stmts)*

                let result = Self {
                    #(#field_bindings),*
                };

                Ok(result)
            }
        }
    };

    output.into()
}

/// Derive `EncodeValue` for a struct.
///
/// All of the members of the struct must also implement EncodeValue.
///
/// The resulting derivation looks like the following:
/// ```ignore
/// impl EncodeValue for HandshakeMessageHeader {
///     fn encode_to(&self, writer: &mut Writer) -> Result<(), CodecError> {
///         self.message_type.encode_to(writer)?;
///         self.length.encode_to(writer)?;
///         Ok(())
///     }
/// }
/// ```
#[proc_macro_derive(EncodeStruct)]
pub fn derive_encode_struct(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let struct_name = input.ident;

    let Data::Struct(data_struct) = input.data else {
        return syn::Error::new_spanned(&struct_name, "EncodeStruct only supports structs")
            .to_compile_error()
            .into();
    };

    let Fields::Named(fields_named) = data_struct.fields else {
        return syn::Error::new_spanned(&struct_name, "EncodeStruct requires named fields")
            .to_compile_error()
            .into();
    };

    let encode_stmts: Vec<_> = fields_named
        .named
        .iter()
        .map(|f| {
            let ident = f.ident.as_ref().unwrap();
            quote! {
                self.#ident.encode_to(writer)?;
            }
        })
        .collect();

    let output = quote! {
        impl EncodeValue for #struct_name {
            fn encode_to(&self, writer: &mut Writer) -> Result<(), CodecError> {
                #(#encode_stmts)*
                Ok(())
            }
        }
    };

    output.into()
}
