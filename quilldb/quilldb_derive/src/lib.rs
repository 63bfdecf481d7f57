use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{self, Data, DeriveInput, Fields, FieldsNamed};

// Named fields of a struct, or a compile error pointing at the deriving item
fn named_fields<'a>(tokens: &'a DeriveInput, derive_name: &str) -> Result<&'a FieldsNamed, TokenStream2>
{
    match &tokens.data
    {
        Data::Struct(ds) => match &ds.fields
        {
            Fields::Named(fields) => Ok(fields),
            _ => Err(syn::Error::new_spanned(&tokens.ident, format!("{} requires a struct with named fields", derive_name)).to_compile_error())
        },
        _ => Err(syn::Error::new_spanned(&tokens.ident, format!("Only structs are supported by {}", derive_name)).to_compile_error())
    }
}

// Every field must be a table; each one is created with its field name as table name
#[proc_macro_derive(DatabaseFactory)]
pub fn databasefactory_derive(input: TokenStream) -> TokenStream
{
    let tokens = syn::parse_macro_input!(input as DeriveInput);
    let fields = match named_fields(&tokens, "DatabaseFactory")
    {
        Ok(fields) => fields,
        Err(error) => return error.into()
    };

    let struct_name = &tokens.ident;
    let field_expressions = fields.named.iter().map(|field|
        {
            let field_name = &field.ident;
            let field_type = &field.ty;
            quote! { #field_name: <#field_type>::new(std::stringify!(#field_name), std::sync::Arc::clone(&transaction_manager_ref)) }
        }
    );

    let expression = quote! {
        impl quilldb::DatabaseFactory for #struct_name
        {
            fn create_database(transaction_manager_ref: std::sync::Arc<std::sync::Mutex<quilldb::transaction::TransactionManager>>) -> Self
            {
                Self
                {
                    #(#field_expressions),*
                }
            }
        }
    };

    expression.into()
}

// Finds tables by identifier for the transaction manager
#[proc_macro_derive(Database)]
pub fn database_derive(input: TokenStream) -> TokenStream
{
    let tokens = syn::parse_macro_input!(input as DeriveInput);
    let fields = match named_fields(&tokens, "Database")
    {
        Ok(fields) => fields,
        Err(error) => return error.into()
    };

    let struct_name = &tokens.ident;
    let field_expressions = fields.named.iter().map(|field|
        {
            let field_name = &field.ident;
            quote! { if table_id == self.#field_name.get_id() { return Some(&mut self.#field_name); } }
        }
    );

    let expression = quote! {
        impl quilldb::Database for #struct_name
        {
            fn get_table_mut(&mut self, table_id: u64) -> Option<&mut dyn quilldb::table::TableBase>
            {
                #(#field_expressions)*
                None
            }
        }
    };

    expression.into()
}

// Binds every `CommandDefinition` field to the associated function with the same name
#[proc_macro_derive(CommandDirectoryFactory)]
pub fn commanddirectoryfactory_derive(input: TokenStream) -> TokenStream
{
    let tokens = syn::parse_macro_input!(input as DeriveInput);
    let fields = match named_fields(&tokens, "CommandDirectoryFactory")
    {
        Ok(fields) => fields,
        Err(error) => return error.into()
    };

    let struct_name = &tokens.ident;
    let field_expressions = fields.named.iter().map(|field|
        {
            let field_name = &field.ident;
            quote! { #field_name: quilldb::command::CommandDefinition::new(std::stringify!(#field_name), #struct_name::#field_name) }
        }
    );

    let expression = quote! {
        impl quilldb::command::CommandDirectoryFactory for #struct_name
        {
            fn new() -> Self
            {
                Self
                {
                    #(#field_expressions),*
                }
            }
        }
    };

    expression.into()
}
