use anyhow::{Result, bail};
use roost_application::SessionStore;
use roost_core::session::{User, UserPatch};

pub fn onboard(store: &SessionStore) -> Result<()> {
    store.set_has_seen_onboarding(true);
    println!("Onboarding marked as seen");
    Ok(())
}

pub fn login(
    store: &SessionStore,
    id: String,
    name: String,
    phone: String,
    email: Option<String>,
) -> Result<()> {
    let user = User {
        id,
        name,
        phone_number: phone,
        email,
    };
    let greeting = format!("Logged in as {}", user.name);
    store.login(user);
    println!("{}", greeting);
    Ok(())
}

pub fn logout(store: &SessionStore) -> Result<()> {
    store.logout();
    println!("Logged out");
    Ok(())
}

pub fn update_user(
    store: &SessionStore,
    name: Option<String>,
    phone: Option<String>,
    email: Option<String>,
) -> Result<()> {
    let patch = UserPatch {
        id: None,
        name,
        phone_number: phone,
        email,
    };
    if patch.is_empty() {
        bail!("Nothing to update: pass --name, --phone or --email");
    }
    if store.snapshot().user.is_none() {
        println!("Not logged in; nothing updated");
        return Ok(());
    }

    store.update_user(patch);
    println!("Profile updated");
    Ok(())
}

pub fn location(store: &SessionStore, label: String) -> Result<()> {
    println!("Location set to {}", label);
    store.set_user_location(label);
    store.set_has_selected_location(true);
    Ok(())
}
