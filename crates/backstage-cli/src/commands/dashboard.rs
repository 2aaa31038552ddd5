use std::sync::Arc;

use anyhow::Result;
use backstage_core::model::{
    Analytics, Contact, Expense, Gig, Goal, Income, Metric, Release, Task, Track,
};
use backstage_core::summary::{
    analytics_delta, CatalogSummary, GigSummary, LedgerSummary, ReleaseSummary, TaskSummary,
};
use backstage_core::Record;
use backstage_store::{Backend, RecordStore};

/// Everything the dashboard shows, computed from one load of each collection.
#[derive(Debug)]
struct Dashboard {
    gigs: GigSummary,
    tasks: TaskSummary,
    releases: ReleaseSummary,
    catalog: CatalogSummary,
    ledger: LedgerSummary,
    contacts: usize,
    goals: Vec<(String, u8)>,
    /// Latest month and its change per metric against the month before.
    analytics: Option<(String, Vec<(Metric, Option<i64>)>)>,
}

impl Dashboard {
    #[allow(clippy::too_many_arguments)]
    fn build(
        gigs: &[Record<Gig>],
        tasks: &[Record<Task>],
        releases: &[Record<Release>],
        tracks: &[Record<Track>],
        income: &[Record<Income>],
        expenses: &[Record<Expense>],
        contacts: &[Record<Contact>],
        goals: &[Record<Goal>],
        analytics: &[Record<Analytics>],
    ) -> Self {
        // Analytics lists newest month first.
        let analytics = analytics.first().map(|latest| {
            let previous = analytics.get(1).map(|r| &r.fields);
            let deltas = Metric::ALL
                .iter()
                .map(|&metric| (metric, analytics_delta(&latest.fields, previous, metric)))
                .collect();
            (latest.fields.month.clone(), deltas)
        });

        Self {
            gigs: GigSummary::from_records(gigs),
            tasks: TaskSummary::from_records(tasks),
            releases: ReleaseSummary::from_records(releases),
            catalog: CatalogSummary::from_records(tracks),
            ledger: LedgerSummary::from_records(income, expenses),
            contacts: contacts.len(),
            goals: goals
                .iter()
                .map(|r| (r.fields.text.clone(), r.fields.progress))
                .collect(),
            analytics,
        }
    }

    fn print(&self) {
        println!("\n🎛  Backstage\n");

        println!("Gigs");
        println!(
            "  {} booked, {} upcoming ({} confirmed, {} pending), ${:.2} earned",
            self.gigs.total,
            self.gigs.upcoming,
            self.gigs.confirmed,
            self.gigs.pending,
            self.gigs.earned
        );

        println!("Tasks");
        println!(
            "  {} pending ({} urgent), {} done",
            self.tasks.pending, self.tasks.urgent, self.tasks.done
        );

        println!("Releases");
        println!(
            "  {} released, {} in progress, ${:.2} budgeted",
            self.releases.released, self.releases.in_progress, self.releases.total_budget
        );

        println!("Catalog");
        println!(
            "  {} tracks, {} released, {} streams",
            self.catalog.tracks, self.catalog.released, self.catalog.total_streams
        );

        println!("Money");
        println!(
            "  ${:.2} in, ${:.2} out, net ${:.2}",
            self.ledger.total_income, self.ledger.total_expenses, self.ledger.net
        );

        println!("Contacts");
        println!("  {}", self.contacts);

        if !self.goals.is_empty() {
            println!("Goals");
            for (text, progress) in &self.goals {
                println!("  {progress:>3}%  {text}");
            }
        }

        if let Some((month, deltas)) = &self.analytics {
            println!("Analytics ({month})");
            for (metric, delta) in deltas {
                match delta {
                    Some(delta) => println!("  {:<20} {delta:+}%", metric.label()),
                    None => println!("  {:<20} -", metric.label()),
                }
            }
        }
    }
}

pub async fn show_dashboard(backend: Arc<dyn Backend>) -> Result<()> {
    let gigs = RecordStore::<Gig>::new(Arc::clone(&backend));
    let tasks = RecordStore::<Task>::new(Arc::clone(&backend));
    let releases = RecordStore::<Release>::new(Arc::clone(&backend));
    let tracks = RecordStore::<Track>::new(Arc::clone(&backend));
    let income = RecordStore::<Income>::new(Arc::clone(&backend));
    let expenses = RecordStore::<Expense>::new(Arc::clone(&backend));
    let contacts = RecordStore::<Contact>::new(Arc::clone(&backend));
    let goals = RecordStore::<Goal>::new(Arc::clone(&backend));
    let analytics = RecordStore::<Analytics>::new(backend);

    let (gigs, tasks, releases, tracks, income, expenses, contacts, goals, analytics) = tokio::try_join!(
        gigs.list(),
        tasks.list(),
        releases.list(),
        tracks.list(),
        income.list(),
        expenses.list(),
        contacts.list(),
        goals.list(),
        analytics.list(),
    )?;
    log::debug!("Loaded all collections for the dashboard");

    Dashboard::build(
        &gigs, &tasks, &releases, &tracks, &income, &expenses, &contacts, &goals, &analytics,
    )
    .print();

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use backstage_store::MemoryBackend;

    #[tokio::test]
    async fn test_dashboard_on_empty_store() {
        assert!(show_dashboard(Arc::new(MemoryBackend::new())).await.is_ok());
    }

    #[tokio::test]
    async fn test_analytics_deltas_use_latest_two_months() {
        let backend: Arc<dyn Backend> = Arc::new(MemoryBackend::new());
        let store = RecordStore::<Analytics>::new(Arc::clone(&backend));
        store
            .create(Analytics {
                spotify: Some(800),
                ..Analytics::new("2025-04")
            })
            .await
            .unwrap();
        store
            .create(Analytics {
                spotify: Some(1000),
                ..Analytics::new("2025-05")
            })
            .await
            .unwrap();
        store
            .create(Analytics {
                spotify: Some(1100),
                ..Analytics::new("2025-06")
            })
            .await
            .unwrap();

        let analytics = store.list().await.unwrap();
        let dashboard = Dashboard::build(&[], &[], &[], &[], &[], &[], &[], &[], &analytics);
        let (month, deltas) = dashboard.analytics.unwrap();
        assert_eq!(month, "2025-06");
        assert_eq!(deltas[0], (Metric::Spotify, Some(10)));
    }
}
