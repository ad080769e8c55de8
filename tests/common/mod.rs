//! Shared test utilities for integration tests
#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;

use chrono::{DateTime, Duration, TimeZone, Utc};
use dashboard_search::models::{
    Client, Communication, Corpus, CorpusData, Invoice, Payment, Project, Task,
};
use tempfile::TempDir;

/// Fixed reference time so rankings are reproducible
pub fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
}

pub fn days_ago(days: i64) -> DateTime<Utc> {
    base_time() - Duration::days(days)
}

/// Builder for test corpora, usable in memory or written out as JSON
#[derive(Default)]
pub struct CorpusBuilder {
    data: CorpusData,
}

impl CorpusBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn project(mut self, id: &str, name: &str, status: &str, age_days: i64) -> Self {
        self.data.projects.push(Project {
            id: id.to_string(),
            name: name.to_string(),
            description: None,
            status: status.to_string(),
            phase: None,
            created_at: days_ago(age_days),
        });
        self
    }

    pub fn project_full(
        mut self,
        id: &str,
        name: &str,
        description: &str,
        status: &str,
        phase: &str,
        age_days: i64,
    ) -> Self {
        self.data.projects.push(Project {
            id: id.to_string(),
            name: name.to_string(),
            description: Some(description.to_string()),
            status: status.to_string(),
            phase: Some(phase.to_string()),
            created_at: days_ago(age_days),
        });
        self
    }

    pub fn client(mut self, id: &str, name: &str, company: Option<&str>, age_days: i64) -> Self {
        self.data.clients.push(Client {
            id: id.to_string(),
            name: name.to_string(),
            email: None,
            company: company.map(str::to_string),
            notes: None,
            created_at: days_ago(age_days),
        });
        self
    }

    pub fn task(mut self, id: &str, title: &str, status: &str, age_days: i64) -> Self {
        self.data.tasks.push(Task {
            id: id.to_string(),
            title: title.to_string(),
            description: None,
            status: status.to_string(),
            priority: None,
            created_at: days_ago(age_days),
        });
        self
    }

    pub fn communication(
        mut self,
        id: &str,
        subject: &str,
        content: Option<&str>,
        comm_type: &str,
        age_days: i64,
    ) -> Self {
        self.data.communications.push(Communication {
            id: id.to_string(),
            subject: subject.to_string(),
            content: content.map(str::to_string),
            comm_type: comm_type.to_string(),
            created_at: days_ago(age_days),
        });
        self
    }

    pub fn payment(
        mut self,
        id: &str,
        description: Option<&str>,
        status: &str,
        amount: f64,
        age_days: i64,
    ) -> Self {
        self.data.payments.push(Payment {
            id: id.to_string(),
            description: description.map(str::to_string),
            status: status.to_string(),
            payment_type: "transfer".to_string(),
            amount,
            created_at: days_ago(age_days),
        });
        self
    }

    pub fn invoice(mut self, id: &str, number: &str, status: &str, amount: f64, age_days: i64) -> Self {
        self.data.invoices.push(Invoice {
            id: id.to_string(),
            number: number.to_string(),
            status: status.to_string(),
            notes: None,
            amount,
            created_at: days_ago(age_days),
        });
        self
    }

    pub fn build(self) -> Corpus {
        Corpus::from_collections(self.data)
    }

    /// Write the corpus as JSON into a fresh temp dir
    pub fn write_json(self) -> (TempDir, PathBuf) {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("corpus.json");
        let json = serde_json::to_string_pretty(&self.data).expect("Failed to serialize corpus");
        fs::write(&path, json).expect("Failed to write corpus file");
        (temp_dir, path)
    }
}

/// A small dashboard with one record of every kind
pub fn sample_corpus() -> CorpusBuilder {
    CorpusBuilder::new()
        .project_full(
            "p1",
            "Mobile Banking App",
            "Customer-facing banking for retail accounts",
            "active",
            "development",
            30,
        )
        .project("p2", "Website Redesign", "completed", 90)
        .client("c1", "Marcus Rodriguez", Some("FinanceApp Inc"), 60)
        .client("c2", "Sarah Chen", Some("Chen Design Studio"), 10)
        .task("t1", "Design login screen", "in-progress", 5)
        .task("t2", "Review banking API contract", "todo", 2)
        .communication("m1", "Kickoff meeting", Some("Agenda for the banking kickoff"), "meeting", 25)
        .payment("pay1", Some("Deposit for redesign"), "completed", 2500.0, 80)
        .invoice("i1", "INV-2024-001", "paid", 5000.0, 45)
        .invoice("i2", "INV-2024-002", "pending", 3200.0, 3)
}
