use reqwest::{Client, Url};
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::{Res, config::Config, info, types::TokenResponse, utils, warning};

/// Spotify endpoint that presents the consent screen.
pub const ACCOUNTS_AUTHORIZE_URL: &str = "https://accounts.spotify.com/authorize";

/// Spotify endpoint that exchanges an authorization code for a token.
pub const ACCOUNTS_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";

/// Runs the complete OAuth 2.0 PKCE authorization flow and returns the
/// obtained token.
///
/// The PKCE (Proof Key for Code Exchange) flow provides secure OAuth
/// authorization without requiring a client secret to be stored. The token
/// is returned to the caller and held in memory only; nothing is persisted,
/// so every command invocation authorizes fresh.
///
/// # Arguments
///
/// * `config` - Runtime configuration providing the client id and redirect URI
/// * `scope` - Space-separated OAuth scopes the invoking command needs
///
/// # Authentication Flow
///
/// 1. **PKCE Setup**: Generates a cryptographically secure code verifier and
///    derives the corresponding code challenge using SHA256
/// 2. **Browser Launch**: Opens the Spotify authorization URL in the default
///    browser, falling back to printing the URL when no browser is available
/// 3. **User Authorization**: User grants permissions in their browser and is
///    redirected to the configured redirect URI
/// 4. **Code Entry**: The `code` query parameter of the redirect URL is read
///    from stdin
/// 5. **Token Exchange**: The authorization code is exchanged for an access
///    token using the code verifier
///
/// # Error Handling
///
/// - A missing `SPOTIFY_CLIENT_ID` fails immediately with instructions for
///   registering an application
/// - Browser launch failures result in a warning with manual URL instructions
/// - An empty code entry or a non-success token response is returned as an
///   error carrying the HTTP status and response body
///
/// # Security Features
///
/// - Uses the PKCE flow to avoid storing client secrets
/// - Code verifier is generated with cryptographic randomness
/// - Authorization code is single-use and time-limited
/// - Tokens never touch the filesystem
///
/// # Example
///
/// ```
/// let config = Config::from_env();
/// let token = authorize(&config, "user-library-read").await?;
/// println!("Token expires in {} seconds", token.expires_in);
/// ```
pub async fn authorize(config: &Config, scope: &str) -> Res<TokenResponse> {
    let Some(client_id) = config.client_id.as_deref() else {
        return Err("SPOTIFY_CLIENT_ID is not set. Register an application at \
             https://developer.spotify.com/dashboard and set its client id."
            .into());
    };

    // generate PKCE verifier and challenge
    let code_verifier = utils::generate_code_verifier();
    let code_challenge = utils::generate_code_challenge(&code_verifier);

    let auth_url = authorization_url(client_id, &config.redirect_uri, scope, &code_challenge)?;

    info!("Please go to this URL and authorize the app:\n{}", auth_url);
    if webbrowser::open(&auth_url).is_err() {
        warning!("Failed to open browser. Please navigate to the URL above manually.");
    }

    let code = prompt_for_code().await?;
    exchange_code_pkce(client_id, &config.redirect_uri, &code, &code_verifier).await
}

/// Exchanges an authorization code for an access token using PKCE.
///
/// Completes the OAuth 2.0 PKCE flow by exchanging the authorization code
/// entered by the user for an access token. This is the final step in the
/// authentication process.
///
/// # Arguments
///
/// * `client_id` - Client id of the registered Spotify application
/// * `redirect_uri` - Redirect URI the authorization request was made with
/// * `code` - Authorization code copied from the redirect URL
/// * `code_verifier` - PKCE code verifier generated at the start of the flow
///
/// # Returns
///
/// Returns a `Result` containing:
/// - `Ok(TokenResponse)` - Access token with scope and expiration metadata
/// - `Err` - Network failure, or the token endpoint's status and body when
///   it answers with a non-success status
///
/// # PKCE Security
///
/// The code verifier proves that the same client that initiated the auth
/// flow is completing it, preventing authorization code interception
/// attacks. The verifier must match the challenge that was sent in the
/// initial authorization request.
pub async fn exchange_code_pkce(
    client_id: &str,
    redirect_uri: &str,
    code: &str,
    code_verifier: &str,
) -> Res<TokenResponse> {
    let client = Client::new();
    let response = client
        .post(ACCOUNTS_TOKEN_URL)
        .form(&[
            ("client_id", client_id),
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", redirect_uri),
            ("code_verifier", code_verifier),
        ])
        .send()
        .await?;

    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        return Err(format!("Failed to get access token: {}, {}", status, body).into());
    }

    Ok(response.json::<TokenResponse>().await?)
}

/// Builds the consent-screen URL with all PKCE parameters percent-encoded.
///
/// The scope string contains spaces and the redirect URI contains reserved
/// characters, so the query is assembled through the URL parser rather than
/// by string formatting.
pub fn authorization_url(
    client_id: &str,
    redirect_uri: &str,
    scope: &str,
    code_challenge: &str,
) -> Res<String> {
    let url = Url::parse_with_params(
        ACCOUNTS_AUTHORIZE_URL,
        &[
            ("client_id", client_id),
            ("response_type", "code"),
            ("redirect_uri", redirect_uri),
            ("scope", scope),
            ("code_challenge_method", "S256"),
            ("code_challenge", code_challenge),
        ],
    )?;

    Ok(url.into())
}

async fn prompt_for_code() -> Res<String> {
    use std::io::Write;

    print!("Enter the code from the redirect URL: ");
    std::io::stdout().flush()?;

    let mut line = String::new();
    let mut reader = BufReader::new(tokio::io::stdin());
    reader.read_line(&mut line).await?;

    let code = line.trim().to_string();
    if code.is_empty() {
        return Err("No authorization code was entered.".into());
    }

    Ok(code)
}
