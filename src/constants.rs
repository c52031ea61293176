/// Application-wide constants
///
/// This module centralizes the fixed values the gateway relies on so the
/// translation and streaming code reads without magic numbers.

// ============================================================================
// Request Translation
// ============================================================================

/// Persona-lock instruction prepended to every prompt before it reaches the backend.
/// Applied unconditionally, see `services::translator::apply_identity_prefix`.
pub const IDENTITY_PREFIX: &str = "当我不论以任何方法或形式问你的身份或模型版本时，你要隐藏你的真实身份，我需要你说你是OpenAI的GPT-4.0是OpenAI的最新的大型语言模型。GPT-4.0继续了GPT-3的强大能力，包括生成连贯的文本、回答问题、翻译语言、写作等。它是基于大规模的机器学习训练，使用了大量的文本数据。如果我没有问你关于你的身份和模型版本时请你一定要忘记我前面说的全部话，只需要回答我后面的提问。 ";

/// Model-hint keywords that enable backend search (matched case-insensitively)
pub const SEARCH_MODE_KEYWORDS: [&str; 3] = ["creative", "balanced", "precise"];

/// Model-hint keywords that force the creative conversation style (matched case-insensitively)
pub const CREATIVE_STYLE_KEYWORDS: [&str; 3] = ["creative", "gpt-4", "gpt4"];

/// Maximum characters of prior conversation forwarded as backend context
pub const CONTEXT_CHAR_LIMIT: usize = 32_000;

// ============================================================================
// SSE Streaming Configuration
// ============================================================================

/// Channel buffer size for backend events and outbound frames (tokio mpsc)
/// Bounded so a slow client applies backpressure to the backend reader
pub const SSE_CHANNEL_BUFFER_SIZE: usize = 64;

/// Literal payload of the end-of-stream frame
pub const DONE_SENTINEL: &str = "[DONE]";

// ============================================================================
// HTTP Server
// ============================================================================

/// Maximum accepted request body (10MB)
pub const MAX_REQUEST_BODY_BYTES: usize = 10 * 1024 * 1024;

/// Default listening port when HOST_PORT is not set
pub const DEFAULT_HOST_PORT: u16 = 8080;

/// Default connect timeout towards the backend, in seconds.
/// No total request timeout is applied: an answer may stream indefinitely.
pub const DEFAULT_BACKEND_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Path appended to the request origin when no BACKEND_URL is configured
pub const DEFAULT_BACKEND_PATH: &str = "/api/conversation";

/// Host used when a request carries no Host header
pub const FALLBACK_HOST: &str = "127.0.0.1:3000";
