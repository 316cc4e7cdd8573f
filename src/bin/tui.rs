use anyhow::Result;

fn main() -> Result<()> {
    afaire::tui::run()
}
