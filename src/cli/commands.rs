use std::io::{self, BufRead};
use std::path::Path;

use chrono::{Datelike, Local, NaiveDate};

use crate::admin::ContentManager;
use crate::app::{AppContext, Result, SajadahError};
use crate::auth::{hash_password, Session};
use crate::cli::{AdminAction, Kind, ListArgs, PASSWORD_ENV};
use crate::domain::{Doa, DoaUpdate, Hadith, HadithUpdate};
use crate::pipeline::{CategoryFilter, ContentView, Entry, SearchScope};
use crate::store::SqliteStore;

/// Labels used in list output.
trait Listing: Entry {
    const NOUN: &'static str;
    fn heading(&self) -> String;
    fn body(&self) -> Vec<String>;
}

impl Listing for Doa {
    const NOUN: &'static str = "doa";

    fn heading(&self) -> String {
        format!("[{}] {}", self.display_category(), self.title)
    }

    fn body(&self) -> Vec<String> {
        vec![
            self.arabic.clone(),
            self.latin.clone(),
            format!("\"{}\"", self.translation),
        ]
    }
}

impl Listing for Hadith {
    const NOUN: &'static str = "hadith";

    fn heading(&self) -> String {
        format!("[{}] {} ({})", self.category, self.title, self.narrator)
    }

    fn body(&self) -> Vec<String> {
        vec![
            self.arabic.clone(),
            self.latin.clone(),
            format!("\"{}\"", self.translation),
            self.explanation.clone(),
        ]
    }
}

fn apply_list_args<T: Entry>(view: &mut ContentView<T>, args: &ListArgs) {
    view.set_category(CategoryFilter::from(args.category.clone()));
    view.set_query(args.query.clone().unwrap_or_default());
}

fn print_listing<T: Listing>(view: &ContentView<T>, full: bool, show_ids: bool) {
    for line in listing_lines(view, full, show_ids) {
        println!("{}", line);
    }
}

fn listing_lines<T: Listing>(view: &ContentView<T>, full: bool, show_ids: bool) -> Vec<String> {
    if view.merged().is_empty() {
        return vec![format!(
            "No {} added yet. Add some with `sajadah admin add-{}`.",
            T::NOUN,
            T::NOUN
        )];
    }

    let shown = view.filtered();
    if shown.is_empty() {
        let message = if view.filter().query.is_empty() {
            format!("No {} in category {}", T::NOUN, view.filter().category.label())
        } else {
            format!("No {} matches your search.", T::NOUN)
        };
        return vec![message];
    }

    let mut lines = vec![format!("Showing {} {}", shown.len(), T::NOUN)];
    for item in shown {
        if show_ids {
            lines.push(format!("{}  {}", item.id(), item.heading()));
        } else {
            lines.push(item.heading());
        }
        if full {
            lines.extend(item.body().into_iter().map(|line| format!("  {}", line)));
            lines.push(String::new());
        }
    }
    lines
}

pub fn list_doas(ctx: &AppContext, args: &ListArgs) -> Result<()> {
    let mut library = ctx.doas(SearchScope::Public)?;
    apply_list_args(library.view_mut(), args);
    print_listing(library.view(), args.full, false);
    Ok(())
}

pub fn list_hadiths(ctx: &AppContext, args: &ListArgs) -> Result<()> {
    let mut library = ctx.hadiths(SearchScope::Public)?;
    apply_list_args(library.view_mut(), args);
    print_listing(library.view(), args.full, false);
    Ok(())
}

pub fn list_categories(ctx: &AppContext, kind: Kind) -> Result<()> {
    let categories = match kind {
        Kind::Doa => ctx.doas(SearchScope::Public)?.view().categories().to_vec(),
        Kind::Hadith => ctx.hadiths(SearchScope::Public)?.view().categories().to_vec(),
    };

    println!("{}", CategoryFilter::All.label());
    for category in categories {
        println!("{}", category.name);
    }
    Ok(())
}

pub async fn show_schedule(ctx: &AppContext, lat: f64, lon: f64, date: Option<NaiveDate>) -> Result<()> {
    let date = date.unwrap_or_else(|| Local::now().date_naive());
    let schedule = ctx.schedule.prayer_schedule(lat, lon, date).await?;
    let location = &schedule.location;

    if location.country.is_empty() {
        println!("{} ({:.4}, {:.4})", location.city, location.lat, location.lon);
    } else {
        println!("{}, {}", location.city, location.country);
    }
    let hijri = &schedule.day.date.hijri;
    println!(
        "{} / {} {} {} H",
        schedule.day.date.readable, hijri.day, hijri.month.en, hijri.year
    );
    println!();
    for (name, time) in schedule.day.timings.ordered() {
        println!("  {:<8} {}", name, time);
    }
    Ok(())
}

pub async fn search_city(ctx: &AppContext, name: &str) -> Result<()> {
    let cities = ctx.schedule.search_city(name).await?;
    if cities.is_empty() {
        println!("No city found for '{}'", name);
        return Ok(());
    }

    for city in cities {
        let region = match city.state {
            Some(state) => format!("{}, {}", state, city.country),
            None => city.country,
        };
        println!("{} ({})\n  --lat {} --lon {}", city.name, region, city.lat, city.lon);
    }
    Ok(())
}

pub async fn show_calendar(ctx: &AppContext, year: Option<i32>, month: Option<u32>) -> Result<()> {
    let today = Local::now().date_naive();
    let year = year.unwrap_or_else(|| today.year());
    let month = month.unwrap_or_else(|| today.month());

    let calendar = ctx.calendar.month(year, month).await?;
    for day in &calendar.days {
        let hijri = &day.date.hijri;
        let holiday = calendar
            .holidays
            .iter()
            .find(|h| h.date.gregorian == day.date.gregorian.date);
        let marker = holiday.map(|h| format!("  * {}", h.name)).unwrap_or_default();
        println!(
            "{}  {:>2} {} {}{}",
            day.date.gregorian.date, hijri.day, hijri.month.en, hijri.year, marker
        );
    }

    if calendar.holidays.is_empty() {
        println!("\nNo Islamic holiday data for {}", year);
    }
    Ok(())
}

pub async fn show_qibla(ctx: &AppContext, lat: f64, lon: f64) -> Result<()> {
    let qibla = ctx.qibla.direction(lat, lon).await?;
    println!(
        "Qibla from ({:.4}, {:.4}): {:.2}° from true north",
        qibla.latitude, qibla.longitude, qibla.direction
    );
    Ok(())
}

/// Password from the environment, or the first line of stdin.
pub fn read_password() -> Result<String> {
    if let Ok(password) = std::env::var(PASSWORD_ENV) {
        return Ok(password);
    }

    eprint!("Password: ");
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    let password = line.trim_end_matches(['\r', '\n']).to_string();
    if password.is_empty() {
        return Err(SajadahError::Unauthorized(format!(
            "no password given; set {} or type it on stdin",
            PASSWORD_ENV
        )));
    }
    Ok(password)
}

pub fn login(ctx: &AppContext, username: &str) -> Result<Session> {
    let password = read_password()?;
    ctx.login(username, &password)
}

pub fn admin(ctx: &AppContext, session: Option<&Session>, action: AdminAction) -> Result<()> {
    if let AdminAction::HashPassword = action {
        println!("{}", hash_password(&read_password()?));
        return Ok(());
    }

    let session = session.ok_or_else(|| SajadahError::Unauthorized("login required".into()))?;
    let cms = ContentManager::new(ctx.store.as_ref(), session).with_bundled(&ctx.static_doas);

    match action {
        AdminAction::AddDoa {
            title,
            arabic,
            latin,
            translation,
            category,
        } => {
            let mut doa = Doa::new(title, arabic, latin, translation);
            doa.category = category;
            let id = cms.add_doa(doa)?;
            println!("Added doa: {}", id);
        }
        AdminAction::EditDoa {
            id,
            title,
            arabic,
            latin,
            translation,
            category,
        } => {
            let update = DoaUpdate {
                title,
                arabic,
                latin,
                translation,
                category,
            };
            cms.update_doa(&id, &update)?;
            println!("Updated doa: {}", id);
        }
        AdminAction::DeleteDoa { id } => {
            cms.delete_doa(&id)?;
            println!("Deleted doa: {}", id);
        }
        AdminAction::AddHadith {
            title,
            category,
            arabic,
            latin,
            translation,
            explanation,
            narrator,
        } => {
            let hadith = Hadith {
                id: String::new(),
                title,
                category,
                arabic,
                latin,
                translation,
                explanation,
                narrator,
            };
            let id = cms.add_hadith(hadith)?;
            println!("Added hadith: {}", id);
        }
        AdminAction::EditHadith {
            id,
            title,
            category,
            arabic,
            latin,
            translation,
            explanation,
            narrator,
        } => {
            let update = HadithUpdate {
                title,
                category,
                arabic,
                latin,
                translation,
                explanation,
                narrator,
            };
            cms.update_hadith(&id, &update)?;
            println!("Updated hadith: {}", id);
        }
        AdminAction::DeleteHadith { id } => {
            cms.delete_hadith(&id)?;
            println!("Deleted hadith: {}", id);
        }
        AdminAction::AddCategory { kind, name } => {
            let id = cms.add_category(kind.into(), &name)?;
            println!("Added category: {} ({})", name.trim(), id);
        }
        AdminAction::DeleteCategory { kind, id } => {
            cms.delete_category(kind.into(), &id)?;
            println!("Deleted category: {}", id);
        }
        AdminAction::Import { kind, path } => import(&cms, kind, &path)?,
        AdminAction::List { kind, filter } => list_stored(ctx, kind, &filter)?,
        // Answered before login.
        AdminAction::HashPassword => {}
    }

    Ok(())
}

fn import(cms: &ContentManager<'_, SqliteStore>, kind: Kind, path: &Path) -> Result<()> {
    let (added, noun) = match kind {
        Kind::Doa => (cms.import_doas_file(path)?, Doa::NOUN),
        Kind::Hadith => (cms.import_hadiths_file(path)?, Hadith::NOUN),
    };
    println!(
        "Import complete: {} new {} from {}",
        added,
        noun,
        path.display()
    );
    Ok(())
}

fn list_stored(ctx: &AppContext, kind: Kind, args: &ListArgs) -> Result<()> {
    match kind {
        Kind::Doa => {
            let mut library = ctx.doas(SearchScope::Admin)?;
            apply_list_args(library.view_mut(), args);
            print_listing(library.view(), args.full, true);
        }
        Kind::Hadith => {
            let mut library = ctx.hadiths(SearchScope::Admin)?;
            apply_list_args(library.view_mut(), args);
            print_listing(library.view(), args.full, true);
        }
    }
    Ok(())
}
