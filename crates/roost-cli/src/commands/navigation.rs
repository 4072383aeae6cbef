use anyhow::Result;
use roost_application::SessionStore;
use roost_core::navigation::{AuthenticatedScreen, GateDecision, SectionDecision};

pub fn status(store: &SessionStore) -> Result<()> {
    let session = store.snapshot();
    println!("{}", serde_json::to_string_pretty(&session)?);
    Ok(())
}

pub fn route(store: &SessionStore) -> Result<()> {
    println!("{}", describe_entry(store.entry_decision()));
    Ok(())
}

pub fn open(store: &SessionStore, screen: AuthenticatedScreen) -> Result<()> {
    println!("{}", describe_section(store.guard(screen)));
    Ok(())
}

fn describe_entry(decision: GateDecision) -> String {
    match decision {
        GateDecision::Loading => "loading".to_string(),
        GateDecision::Route(destination) => {
            format!("{} ({})", destination.route(), destination)
        }
    }
}

fn describe_section(decision: SectionDecision) -> String {
    match decision {
        SectionDecision::Render(screen) => format!("render {}", screen.route()),
        SectionDecision::Redirect(destination) => {
            format!("redirect {}", destination.route())
        }
    }
}
