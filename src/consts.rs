pub const WRITE_METHOD: &str = "POST";
pub const ASAAS_AUTH_HEADER: &str = "access_token";
pub const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

pub const MSG_METHOD_NOT_ALLOWED: &str = "Método não permitido";
pub const MSG_MISSING_CREDENTIAL: &str =
    "Chave ASAAS_KEY ausente. Configure em Environment Variables.";
pub const MSG_MISSING_REQUIRED_FIELDS: &str = "Campos obrigatórios ausentes";
