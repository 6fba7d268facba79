use anyhow::Result;
use switch_app_core::{ProfileManager, ProfilesRepo};
use switch_core::Profile;

pub fn render_table(profiles: &[Profile]) -> String {
    if profiles.is_empty() {
        return "No editors configured.\n".to_string();
    }

    let mut out = format!(
        "{:<12} {:<16} {:<8} {:<24} {:<22} {:<22}\n",
        "ID", "NAME", "ENABLED", "EXECUTABLE", "OPEN FILE", "OPEN PROJECT"
    );
    out.push_str(&format!(
        "{:-<12} {:-<16} {:-<8} {:-<24} {:-<22} {:-<22}\n",
        "", "", "", "", "", ""
    ));
    for p in profiles {
        out.push_str(&format!(
            "{:<12} {:<16} {:<8} {:<24} {:<22} {:<22}\n",
            p.id,
            p.display_name,
            if p.enabled { "yes" } else { "no" },
            p.executable_path,
            p.open_file_shortcut,
            p.open_project_shortcut
        ));
    }
    out
}

pub fn handle_list<P: ProfilesRepo>(mgr: &ProfileManager<P>) -> Result<()> {
    print!("{}", render_table(&mgr.list()?));
    Ok(())
}

pub fn handle_add<P: ProfilesRepo>(mgr: &ProfileManager<P>, profile: Profile) -> Result<()> {
    let p = mgr.add(profile)?;
    println!("Editor '{}' ({}) added.", p.display_name, p.id);
    Ok(())
}

pub fn handle_remove<P: ProfilesRepo>(mgr: &ProfileManager<P>, id: &str) -> Result<()> {
    mgr.remove(id)?;
    println!("Editor '{}' removed.", id);
    Ok(())
}

pub fn handle_set_enabled<P: ProfilesRepo>(
    mgr: &ProfileManager<P>,
    id: &str,
    enabled: bool,
) -> Result<()> {
    let p = mgr.set_enabled(id, enabled)?;
    let state = if p.enabled { "enabled" } else { "disabled" };
    println!("Editor '{}' {}.", p.display_name, state);
    Ok(())
}

pub fn handle_reset<P: ProfilesRepo>(mgr: &ProfileManager<P>) -> Result<()> {
    let profiles = mgr.reset()?;
    println!("Restored {} default editors.", profiles.len());
    Ok(())
}
