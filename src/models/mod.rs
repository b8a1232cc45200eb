pub mod game;

// Re-export commonly used types so other modules can use `crate::models::X`
pub use game::{
    FinishSessionRequest, FinishSessionResponse, GameMode, GameSession, GameWallet,
    PreRegisterRequest, PreRegisterResponse, PreRegistration, StartSessionRequest,
    StartSessionResponse, WalletQuery, WalletResponse,
};
