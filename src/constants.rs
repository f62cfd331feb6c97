/// Application constants

// Server
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 23567;
pub const ALIVE_MESSAGE: &str = "I'm alive!";

// API version
pub const API_VERSION: &str = "v1";

// Wordfeud platform
pub const WORDFEUD_API_URL: &str = "https://api.wordfeud.com/wf/";
pub const WORDFEUD_USER_AGENT: &str = "WebFeudClient/3.0.17 (Android 8.1.0)";
pub const WORDFEUD_PASSWORD_SALT: &str = "JarJarBinks9";
pub const WORDFEUD_SESSION_COOKIE: &str = "sessionid";
pub const WORDFEUD_LOGIN_REQUIRED: &str = "login_required";
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 15;

// Notification feed
pub const NOTIFICATION_NEW_GAME: &str = "new_game";

// Invitation confirmation budget: 60 polls x 1s
pub const DEFAULT_INVITE_POLL_INTERVAL_MS: u64 = 1000;
pub const DEFAULT_INVITE_MAX_ATTEMPTS: u32 = 60;

// Board
pub const BOARD_SIZE: usize = 15;
