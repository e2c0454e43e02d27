//! `${VAR}` expansion for configuration values.
//!
//! Secrets (SMTP passwords, login credentials, gateway tokens) are kept out of
//! the config file and pulled from the environment at load time.

use crate::config::model::AppConfig;

/// Expands `${VAR}` sequences in `input`.
///
/// - `${VAR}` is replaced by the variable's value; a missing variable expands to "".
/// - `\${` produces a literal `${`.
/// - An unterminated `${` is copied through unchanged.
pub fn expand_env_vars(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(pos) = rest.find(['\\', '$']) {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];

        if let Some(after) = tail.strip_prefix("\\${") {
            out.push_str("${");
            rest = after;
            continue;
        }

        if let Some(after) = tail.strip_prefix("${") {
            if let Some(end) = after.find('}') {
                let name = after[..end].trim();
                out.push_str(&std::env::var(name).unwrap_or_default());
                rest = &after[end + 1..];
                continue;
            }
        }

        // Lone '\' or '$' (or unterminated "${"): keep the character as-is
        let ch_len = tail.chars().next().map(char::len_utf8).unwrap_or(1);
        out.push_str(&tail[..ch_len]);
        rest = &tail[ch_len..];
    }

    out.push_str(rest);
    out
}

fn expand_opt(value: &mut Option<String>) {
    if let Some(v) = value.as_mut() {
        *v = expand_env_vars(v);
    }
}

fn expand(value: &mut String) {
    *value = expand_env_vars(value);
}

/// Applies [`expand_env_vars`] to every field that may carry a secret or a
/// deployment-specific location.
pub fn expand_in_place(cfg: &mut AppConfig) {
    expand(&mut cfg.sqlite.db_path);

    for check in &mut cfg.checks {
        expand(&mut check.url);

        if let Some(login) = check.login.as_mut() {
            expand(&mut login.login_url);
            expand_opt(&mut login.username);
            expand_opt(&mut login.password);
            for value in login.additional_fields.values_mut() {
                expand(value);
            }
            expand_opt(&mut login.post_login_url);
        }
    }

    if let Some(notifications) = cfg.notifications.as_mut() {
        if let Some(email) = notifications.email.as_mut() {
            expand(&mut email.host);
            expand_opt(&mut email.username);
            expand_opt(&mut email.password);
            expand(&mut email.from);
            for to in &mut email.to {
                expand(to);
            }
        }

        if let Some(sms) = notifications.sms.as_mut() {
            expand(&mut sms.endpoint);
            for value in sms.headers.values_mut() {
                expand(value);
            }
            expand(&mut sms.body_template);
        }
    }
}
