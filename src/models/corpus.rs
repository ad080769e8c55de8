use serde::{Deserialize, Serialize};

use super::entity::{Client, Communication, Entity, EntityKind, Invoice, Payment, Project, Task};

/// The six typed collections a caller hands over at session start
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CorpusData {
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub clients: Vec<Client>,
    #[serde(default)]
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub communications: Vec<Communication>,
    #[serde(default)]
    pub payments: Vec<Payment>,
    #[serde(default)]
    pub invoices: Vec<Invoice>,
}

/// Read-only set of searchable entities for one session.
///
/// Entities keep a fixed order (projects, clients, tasks, communications,
/// payments, invoices, each in input order) so identical inputs always rank
/// identically.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Corpus {
    entities: Vec<Entity>,
}

impl Corpus {
    pub fn new(
        projects: Vec<Project>,
        clients: Vec<Client>,
        tasks: Vec<Task>,
        communications: Vec<Communication>,
        payments: Vec<Payment>,
        invoices: Vec<Invoice>,
    ) -> Self {
        Self::from_collections(CorpusData {
            projects,
            clients,
            tasks,
            communications,
            payments,
            invoices,
        })
    }

    pub fn from_collections(data: CorpusData) -> Self {
        let capacity = data.projects.len()
            + data.clients.len()
            + data.tasks.len()
            + data.communications.len()
            + data.payments.len()
            + data.invoices.len();

        let mut entities = Vec::with_capacity(capacity);
        entities.extend(data.projects.into_iter().map(Entity::Project));
        entities.extend(data.clients.into_iter().map(Entity::Client));
        entities.extend(data.tasks.into_iter().map(Entity::Task));
        entities.extend(data.communications.into_iter().map(Entity::Communication));
        entities.extend(data.payments.into_iter().map(Entity::Payment));
        entities.extend(data.invoices.into_iter().map(Entity::Invoice));

        Self { entities }
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn count_of(&self, kind: EntityKind) -> usize {
        self.entities.iter().filter(|e| e.kind() == kind).count()
    }
}

impl From<CorpusData> for Corpus {
    fn from(data: CorpusData) -> Self {
        Self::from_collections(data)
    }
}

impl FromIterator<Entity> for Corpus {
    fn from_iter<I: IntoIterator<Item = Entity>>(iter: I) -> Self {
        Self { entities: iter.into_iter().collect() }
    }
}
