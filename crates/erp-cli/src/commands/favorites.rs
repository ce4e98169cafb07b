use erp_core::favorites::Favorites;

use crate::app::AppContext;
use crate::cli::{FavoritesArgs, FavoritesSubcommand};
use crate::errors::CliError;
use crate::ui::{badge, header, hint, print_json, Badge};

pub fn handle_favorites(ctx: &AppContext, args: &FavoritesArgs) -> anyhow::Result<()> {
    let favorites = Favorites::new(ctx.adapter()?);

    match &args.command {
        FavoritesSubcommand::List { json } => {
            let ids = favorites.list();
            let ui = ctx.ui_context(*json, None);
            if ui.mode.is_json() {
                return print_json(&ids);
            }
            if !ctx.quiet() {
                println!("{}", header(&ui, "favorites", None));
            }
            if ids.is_empty() && !ctx.quiet() {
                println!("{}", hint(&ui, "No starred reports. Run `erp favorites toggle <report>`."));
            }
            for id in ids {
                println!("{}", id);
            }
        }
        FavoritesSubcommand::Toggle { report } => {
            let report = report.trim();
            if report.is_empty() {
                return Err(CliError::invalid_input("Report id cannot be empty").into());
            }
            let starred = favorites.toggle(report)?;
            if !ctx.quiet() {
                let ui = ctx.ui_context(false, None);
                let verb = if starred { "Starred" } else { "Unstarred" };
                println!("{}", badge(&ui, Badge::Ok, &format!("{} {}", verb, report)));
            }
        }
    }
    Ok(())
}
