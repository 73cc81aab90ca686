// Account provisioning, export and legacy snapshot import

use std::fs;
use std::path::Path;

use crate::app_data::AppData;
use crate::errors::internal::CredentialError;
use crate::errors::InternalError;
use crate::providers::legacy_codec::{self, LegacyAccount};
use crate::providers::PasswordValidatorProvider;
use crate::types::internal::{Account, Role};

/// Outcome of importing a legacy snapshot
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LegacyImportReport {
    pub created: Vec<String>,
    pub skipped: Vec<String>,
}

/// Create an account with a hashed password
///
/// # Returns
/// * `Ok(Account)` - The created account
/// * `Err(InternalError)` - Policy violation, duplicate username or storage failure
pub async fn provision_account(
    app_data: &AppData,
    username: &str,
    password: &str,
    role: Role,
    phone_number: Option<&str>,
) -> Result<Account, InternalError> {
    let validator = PasswordValidatorProvider::new();
    let username = validator.validate_username(username)?;
    validator.validate(password)?;

    let hash = app_data.crypto_provider.hash_password(password)?;
    let phone_number = phone_number.map(str::trim).filter(|p| !p.is_empty()).map(str::to_string);

    let account = app_data
        .account_store
        .create_account(username, role, phone_number, hash, app_data.clock.timestamp())
        .await?;
    tracing::info!(username, role = %role, "Account created");

    Ok(account)
}

/// `create-account` command
///
/// Generates a password when none is given and prints it once.
pub async fn create_account(
    app_data: &AppData,
    username: &str,
    role: Role,
    phone_number: Option<&str>,
    password: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let generated = password.is_none();
    let password = password.unwrap_or_else(|| app_data.crypto_provider.generate_secure_password());

    match provision_account(app_data, username, &password, role, phone_number).await {
        Ok(account) => {
            println!("✓ Created {} account '{}' ({})", account.role, account.username, account.id);
            if generated {
                println!("  Password: {}", password);
                println!("  This password will not be shown again.");
            }
            Ok(())
        }
        Err(InternalError::Credential(CredentialError::DuplicateUsername(name))) => {
            println!("❌ Username already exists: {}", name);
            Err(format!("duplicate username: {}", name).into())
        }
        Err(e) => Err(e.into()),
    }
}

/// Encode the account list in the legacy storage format
pub async fn encode_account_list(app_data: &AppData) -> Result<String, InternalError> {
    let accounts = app_data.account_store.list_accounts().await?;
    let legacy: Vec<LegacyAccount> = accounts.iter().map(LegacyAccount::from).collect();
    legacy_codec::encode_accounts(&legacy)
}

/// `export-accounts` command; writes to `output` or stdout
pub async fn export_accounts(app_data: &AppData, output: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let encoded = encode_account_list(app_data).await?;

    match output {
        Some(path) => {
            fs::write(path, &encoded)?;
            println!("✓ Account list written to {}", path.display());
        }
        None => println!("{}", encoded),
    }

    Ok(())
}

/// Import accounts from a legacy snapshot
///
/// Every password is hashed on the way in. Accounts whose username already
/// exists, whose role is unknown or that have no password entry are skipped.
pub async fn import_legacy_snapshot(
    app_data: &AppData,
    users_encoded: &str,
    passwords_encoded: &str,
) -> Result<LegacyImportReport, InternalError> {
    let accounts = legacy_codec::decode_accounts(users_encoded)?;
    let passwords = legacy_codec::decode_passwords(passwords_encoded)?;
    let mut report = LegacyImportReport::default();

    for legacy in accounts {
        let Ok(role) = legacy.role.parse::<Role>() else {
            tracing::warn!(username = %legacy.username, role = %legacy.role, "Skipping legacy account with unknown role");
            report.skipped.push(legacy.username);
            continue;
        };
        let Some(password) = passwords.get(&legacy.username) else {
            tracing::warn!(username = %legacy.username, "Skipping legacy account without password");
            report.skipped.push(legacy.username);
            continue;
        };
        if app_data.account_store.find_by_username(&legacy.username).await?.is_some() {
            tracing::info!(username = %legacy.username, "Legacy account already present");
            report.skipped.push(legacy.username);
            continue;
        }

        let hash = app_data.crypto_provider.hash_password(password)?;
        app_data
            .account_store
            .create_account(
                &legacy.username,
                role,
                legacy.phone_number.filter(|p| !p.trim().is_empty()),
                hash,
                app_data.clock.timestamp(),
            )
            .await?;
        report.created.push(legacy.username);
    }

    tracing::info!(
        created = report.created.len(),
        skipped = report.skipped.len(),
        "Legacy snapshot imported"
    );
    Ok(report)
}

/// `import-legacy` command
pub async fn import_legacy(
    app_data: &AppData,
    users_file: &Path,
    passwords_file: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    let users = fs::read_to_string(users_file)?;
    let passwords = fs::read_to_string(passwords_file)?;

    let report = import_legacy_snapshot(app_data, &users, &passwords).await?;

    for username in &report.created {
        println!("✓ Imported {}", username);
    }
    for username in &report.skipped {
        println!("- Skipped {}", username);
    }
    println!(
        "Imported {} account(s), skipped {}",
        report.created.len(),
        report.skipped.len()
    );

    Ok(())
}
