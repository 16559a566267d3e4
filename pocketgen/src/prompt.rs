//! Interactive prompts.
//!
//! Prompts are written to stderr so stdout only ever carries generated code.

use anyhow::{Context, Result};
use pocketgen::client::Credentials;
use pocketgen::schema::error::SelectionError;
use pocketgen::schema::{CollectionSelector, RawCollection};
use std::io::{BufRead, Write};

/// Ask for a line, returning `default` for an empty answer.
///
/// Fails when the input is closed.
fn ask<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    question: &str,
    default: Option<&str>,
) -> Result<String> {
    match default {
        Some(default) => write!(output, "{} [{}]: ", question, default)?,
        None => write!(output, "{}: ", question)?,
    }
    output.flush()?;

    let mut answer = String::new();
    let read = input
        .read_line(&mut answer)
        .context("Failed to read answer")?;
    if read == 0 {
        anyhow::bail!("No answer to {:?}: input is closed", question);
    }

    let answer = answer.trim();
    if answer.is_empty() {
        Ok(default.unwrap_or_default().to_string())
    } else {
        Ok(answer.to_string())
    }
}

/// Prompt for every missing credential value.
pub fn complete_credentials(credentials: Credentials) -> Result<Credentials> {
    complete_credentials_with(
        credentials,
        &mut std::io::stdin().lock(),
        &mut std::io::stderr(),
        || rpassword::prompt_password("Superuser password: ").context("Failed to read password"),
    )
}

fn complete_credentials_with<R, W, P>(
    mut credentials: Credentials,
    input: &mut R,
    output: &mut W,
    password: P,
) -> Result<Credentials>
where
    R: BufRead,
    W: Write,
    P: FnOnce() -> Result<String>,
{
    if credentials.host.is_empty() {
        credentials.host = ask(input, output, "PocketBase URL", Some("http://127.0.0.1:8090"))?;
    }

    while credentials.email.is_empty() {
        credentials.email = ask(input, output, "Superuser email", None)?;
    }

    if credentials.password.is_empty() {
        credentials.password = password()?;
    }

    Ok(credentials)
}

/// Ask for the passphrase protecting the encrypted credentials file.
pub fn passphrase(confirm: bool) -> Result<String> {
    let passphrase =
        rpassword::prompt_password("Credentials passphrase: ").context("Failed to read passphrase")?;
    if passphrase.is_empty() {
        anyhow::bail!("The credentials passphrase must not be empty");
    }

    if confirm {
        let repeated = rpassword::prompt_password("Repeat passphrase: ")
            .context("Failed to read passphrase")?;
        if repeated != passphrase {
            anyhow::bail!("Passphrases do not match");
        }
    }

    Ok(passphrase)
}

/// Lets the user pick collections from a numbered list.
///
/// Non-system collections are preselected; an empty answer keeps the
/// preselection.
#[derive(Debug, Default)]
pub struct PromptSelector;

impl CollectionSelector for PromptSelector {
    fn select<'a>(
        &self,
        collections: &'a [RawCollection],
    ) -> Result<Vec<&'a RawCollection>, SelectionError> {
        let mut stderr = std::io::stderr().lock();
        writeln!(stderr, "Collections:")?;
        for (index, collection) in collections.iter().enumerate() {
            let mark = if collection.system { ' ' } else { 'x' };
            writeln!(stderr, "  [{}] {:>2}. {}", mark, index + 1, collection)?;
        }
        write!(
            stderr,
            "Select collections (numbers or names, comma separated; 'all'; empty keeps [x]): "
        )?;
        stderr.flush()?;

        let mut answer = String::new();
        std::io::stdin().lock().read_line(&mut answer)?;

        let indices = parse_selection(&answer, collections)?;
        Ok(indices.into_iter().map(|i| &collections[i]).collect())
    }
}

/// Parse a selection answer into collection indices, in list order.
pub fn parse_selection(
    answer: &str,
    collections: &[RawCollection],
) -> Result<Vec<usize>, SelectionError> {
    let answer = answer.trim();

    if answer.is_empty() {
        return Ok(collections
            .iter()
            .enumerate()
            .filter(|(_, c)| !c.system)
            .map(|(i, _)| i)
            .collect());
    }

    if answer.eq_ignore_ascii_case("all") {
        return Ok((0..collections.len()).collect());
    }

    let mut chosen = vec![false; collections.len()];
    for token in answer.split([',', ' ']).filter(|t| !t.is_empty()) {
        let index = match token.parse::<usize>() {
            Ok(number) if (1..=collections.len()).contains(&number) => number - 1,
            Ok(_) => {
                return Err(SelectionError::invalid_input(token, "number out of range"));
            }
            Err(_) => collections
                .iter()
                .position(|c| c.name.eq_ignore_ascii_case(token))
                .ok_or_else(|| SelectionError::invalid_input(token, "unknown collection"))?,
        };
        chosen[index] = true;
    }

    Ok(chosen
        .iter()
        .enumerate()
        .filter(|(_, chosen)| **chosen)
        .map(|(i, _)| i)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collections() -> Vec<RawCollection> {
        vec![
            RawCollection::new("pbc_3142635823", "_superusers").system(true),
            RawCollection::new("_pb_users_auth_", "users"),
            RawCollection::new("pbc_posts", "posts"),
        ]
    }

    #[test]
    fn test_ask_uses_default_for_empty_answer() {
        let mut output = Vec::new();
        let answer = ask(&mut "\n".as_bytes(), &mut output, "PocketBase URL", Some("http://x"))
            .expect("answer");

        assert_eq!(answer, "http://x");
        assert_eq!(String::from_utf8(output).expect("utf8"), "PocketBase URL [http://x]: ");
    }

    #[test]
    fn test_ask_fails_on_closed_input() {
        let result = ask(&mut "".as_bytes(), &mut Vec::new(), "Superuser email", None);
        assert!(result.is_err());
    }

    #[test]
    fn test_complete_credentials_repeats_empty_email() {
        let mut input = "\n\nadmin@example.com\n".as_bytes();
        let credentials = complete_credentials_with(
            Credentials::default(),
            &mut input,
            &mut Vec::new(),
            || Ok("secret".to_string()),
        )
        .expect("credentials");

        assert_eq!(credentials.host, "http://127.0.0.1:8090");
        assert_eq!(credentials.email, "admin@example.com");
        assert_eq!(credentials.password, "secret");
    }

    #[test]
    fn test_complete_credentials_stops_on_closed_input() {
        let credentials = Credentials::new("http://127.0.0.1:9", "", "");
        let result = complete_credentials_with(credentials, &mut "".as_bytes(), &mut Vec::new(), || {
            panic!("password must not be asked")
        });
        assert!(result.is_err());
    }

    #[test]
    fn test_empty_answer_selects_non_system() {
        assert_eq!(parse_selection("\n", &collections()).expect("selection"), vec![1, 2]);
    }

    #[test]
    fn test_all_answer() {
        assert_eq!(parse_selection("ALL", &collections()).expect("selection"), vec![0, 1, 2]);
    }

    #[test]
    fn test_numbers_and_names() {
        let selection = parse_selection("3, _SUPERUSERS 3", &collections()).expect("selection");
        assert_eq!(selection, vec![0, 2]);
    }

    #[test]
    fn test_invalid_answers() {
        assert!(matches!(
            parse_selection("4", &collections()),
            Err(SelectionError::InvalidInput { .. })
        ));
        assert!(matches!(
            parse_selection("comments", &collections()),
            Err(SelectionError::InvalidInput { .. })
        ));
    }
}
