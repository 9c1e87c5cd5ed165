use proc_macro::TokenStream as TokenStream1;
use proc_macro2::TokenStream as TokenStream2;
use quote::{quote, ToTokens};
use syn::{parse_macro_input, Ident, ImplItemFn};

/// This macro is added before a method of `RoundEngine` in the impl block.
/// Use this macro to first check if the current game phase is exactly the
/// phase in the attribute.
///
/// For example, `#[allowed_phase(Betting)]` will make a method first check
/// if the current game phase is `Betting`. If not, the method returns
/// `GameError::WrongPhase` before touching any state.
///
/// The expansion refers to `GamePhase` and `GameError` unqualified, so both
/// must be in scope where the macro is used.
#[proc_macro_attribute]
pub fn allowed_phase(attr: TokenStream1, item: TokenStream1) -> TokenStream1 {
    let phase = parse_macro_input!(attr as Ident);
    let mut ast = parse_macro_input!(item as ImplItemFn);
    let operation = ast.sig.ident.to_string();

    let guard = phase_guard(&phase, &operation);
    let early_return: syn::Stmt = match syn::parse2(guard) {
        Ok(stmt) => stmt,
        Err(err) => return err.to_compile_error().into(),
    };
    ast.block.stmts.insert(0, early_return);
    ast.into_token_stream().into()
}

fn phase_guard(phase: &Ident, operation: &str) -> TokenStream2 {
    quote! {
        if self.current_game_phase != GamePhase::#phase {
            return Err(GameError::WrongPhase {
                operation: #operation,
                expected: GamePhase::#phase,
                actual: self.current_game_phase,
            });
        }
    }
}
