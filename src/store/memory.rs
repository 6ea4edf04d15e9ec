//! In-memory content store.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;

use super::{seed_fixtures, ContentStore, StoreError};
use crate::models::{
    EntityId, Event, Inquiry, NewEvent, NewInquiry, NewService, NewTestimonial, NewUser, Service,
    Testimonial, User,
};

/// Source of inquiry timestamps.
pub type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

/// Rows of one entity kind plus the counter that numbers them.
///
/// Ids start at 1 and are never reused. Rows are keyed in id order, which is
/// also insertion order.
struct Table<T> {
    next_id: EntityId,
    rows: BTreeMap<EntityId, T>,
}

impl<T: Clone> Table<T> {
    fn new() -> Self {
        Self {
            next_id: 1,
            rows: BTreeMap::new(),
        }
    }

    /// Assign the next id, build the row with it, and store it.
    fn insert_with(&mut self, build: impl FnOnce(EntityId) -> T) -> Result<T, StoreError> {
        let id = self.next_id;
        let next_id = id
            .checked_add(1)
            .ok_or_else(|| StoreError::Internal("Entity id space exhausted".to_string()))?;

        let row = build(id);
        self.rows.insert(id, row.clone());
        self.next_id = next_id;
        Ok(row)
    }

    fn get(&self, id: EntityId) -> Option<T> {
        self.rows.get(&id).cloned()
    }

    fn values(&self) -> impl Iterator<Item = &T> {
        self.rows.values()
    }
}

/// Process-lifetime store backed by one locked table per entity kind.
///
/// Construct one per process (or per test) and share it behind an `Arc`.
pub struct MemStore {
    users: RwLock<Table<User>>,
    testimonials: RwLock<Table<Testimonial>>,
    services: RwLock<Table<Service>>,
    events: RwLock<Table<Event>>,
    inquiries: RwLock<Table<Inquiry>>,
    clock: Clock,
}

impl MemStore {
    /// Create an empty store using the system clock.
    pub fn new() -> Self {
        let clock: Clock = Arc::new(Utc::now);
        Self::with_clock(clock)
    }

    /// Create an empty store that stamps inquiries with `clock`.
    pub fn with_clock(clock: Clock) -> Self {
        Self {
            users: RwLock::new(Table::new()),
            testimonials: RwLock::new(Table::new()),
            services: RwLock::new(Table::new()),
            events: RwLock::new(Table::new()),
            inquiries: RwLock::new(Table::new()),
            clock,
        }
    }

    /// Create a store pre-loaded with the site's fixture content.
    pub async fn seeded() -> Result<Self, StoreError> {
        let store = Self::new();
        seed_fixtures(&store).await?;
        Ok(store)
    }
}

impl Default for MemStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ContentStore for MemStore {
    // ==================== USERS ====================

    async fn get_user(&self, id: EntityId) -> Result<Option<User>, StoreError> {
        Ok(self.users.read().get(id))
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        Ok(self
            .users
            .read()
            .values()
            .find(|user| user.username == username)
            .cloned())
    }

    async fn create_user(&self, input: NewUser) -> Result<User, StoreError> {
        let mut users = self.users.write();

        if users.values().any(|user| user.username == input.username) {
            return Err(StoreError::Conflict(format!(
                "Username '{}' is already taken",
                input.username
            )));
        }

        let user = users.insert_with(|id| User::from_new(id, input))?;
        tracing::debug!(id = user.id, username = %user.username, "Created user");
        Ok(user)
    }

    // ==================== TESTIMONIALS ====================

    async fn list_testimonials(&self) -> Result<Vec<Testimonial>, StoreError> {
        Ok(self
            .testimonials
            .read()
            .values()
            .filter(|t| t.is_active)
            .cloned()
            .collect())
    }

    async fn get_testimonial(&self, id: EntityId) -> Result<Option<Testimonial>, StoreError> {
        Ok(self.testimonials.read().get(id))
    }

    async fn create_testimonial(&self, input: NewTestimonial) -> Result<Testimonial, StoreError> {
        let testimonial = self
            .testimonials
            .write()
            .insert_with(|id| Testimonial::from_new(id, input))?;
        tracing::debug!(id = testimonial.id, "Created testimonial");
        Ok(testimonial)
    }

    // ==================== SERVICES ====================

    async fn list_services(&self) -> Result<Vec<Service>, StoreError> {
        Ok(self
            .services
            .read()
            .values()
            .filter(|s| s.is_active)
            .cloned()
            .collect())
    }

    async fn get_service(&self, id: EntityId) -> Result<Option<Service>, StoreError> {
        Ok(self.services.read().get(id))
    }

    async fn get_service_by_slug(&self, slug: &str) -> Result<Option<Service>, StoreError> {
        Ok(self
            .services
            .read()
            .values()
            .find(|s| s.slug == slug && s.is_active)
            .cloned())
    }

    async fn create_service(&self, input: NewService) -> Result<Service, StoreError> {
        let mut services = self.services.write();

        if services.values().any(|s| s.slug == input.slug) {
            return Err(StoreError::Conflict(format!(
                "Service slug '{}' is already taken",
                input.slug
            )));
        }

        let service = services.insert_with(|id| Service::from_new(id, input))?;
        tracing::debug!(id = service.id, slug = %service.slug, "Created service");
        Ok(service)
    }

    // ==================== EVENTS ====================

    async fn list_events(&self) -> Result<Vec<Event>, StoreError> {
        let mut events: Vec<Event> = self
            .events
            .read()
            .values()
            .filter(|e| e.is_active)
            .cloned()
            .collect();
        events.sort_by_key(|e| e.date);
        Ok(events)
    }

    async fn get_event(&self, id: EntityId) -> Result<Option<Event>, StoreError> {
        Ok(self.events.read().get(id))
    }

    async fn create_event(&self, input: NewEvent) -> Result<Event, StoreError> {
        let event = self
            .events
            .write()
            .insert_with(|id| Event::from_new(id, input))?;
        tracing::debug!(id = event.id, date = %event.date, "Created event");
        Ok(event)
    }

    // ==================== INQUIRIES ====================

    async fn list_inquiries(&self) -> Result<Vec<Inquiry>, StoreError> {
        let mut inquiries: Vec<Inquiry> = self.inquiries.read().values().cloned().collect();
        inquiries.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(inquiries)
    }

    async fn get_inquiry(&self, id: EntityId) -> Result<Option<Inquiry>, StoreError> {
        Ok(self.inquiries.read().get(id))
    }

    async fn create_inquiry(&self, input: NewInquiry) -> Result<Inquiry, StoreError> {
        let mut inquiries = self.inquiries.write();
        let created_at = (self.clock)();
        let inquiry = inquiries.insert_with(|id| Inquiry::from_new(id, input, created_at))?;
        tracing::debug!(id = inquiry.id, "Recorded inquiry");
        Ok(inquiry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use std::collections::HashSet;
    use std::sync::atomic::{AtomicI64, Ordering};

    fn fixed_clock(at: DateTime<Utc>) -> Clock {
        Arc::new(move || at)
    }

    /// A clock that advances one second per reading.
    fn ticking_clock(start: DateTime<Utc>) -> Clock {
        let ticks = Arc::new(AtomicI64::new(0));
        Arc::new(move || start + Duration::seconds(ticks.fetch_add(1, Ordering::SeqCst)))
    }

    fn may_first() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2023, 5, 1, 9, 0, 0).unwrap()
    }

    fn testimonial(name: &str) -> NewTestimonial {
        NewTestimonial {
            name: name.to_string(),
            content: format!("{} loves it here", name),
            ..Default::default()
        }
    }

    fn service(slug: &str, is_active: Option<bool>) -> NewService {
        NewService {
            title: slug.replace('-', " "),
            description: "Care".to_string(),
            slug: slug.to_string(),
            is_active,
            ..Default::default()
        }
    }

    fn event(title: &str, date: &str) -> NewEvent {
        NewEvent {
            title: title.to_string(),
            description: "Community event".to_string(),
            image: None,
            date: crate::models::parse_event_date(date).unwrap(),
            start_time: None,
            end_time: None,
            is_active: None,
        }
    }

    fn inquiry(name: &str) -> NewInquiry {
        NewInquiry {
            name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase()),
            ..Default::default()
        }
    }

    fn user(username: &str) -> NewUser {
        NewUser {
            username: username.to_string(),
            password: "secret".to_string(),
            email: None,
            full_name: None,
            role: None,
        }
    }

    #[tokio::test]
    async fn test_ids_are_sequential_per_kind() {
        let store = MemStore::new();

        let mut ids = Vec::new();
        for i in 0..5 {
            ids.push(store.create_testimonial(testimonial(&format!("T{}", i))).await.unwrap().id);
        }
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);

        // Counters are independent across kinds.
        let svc = store.create_service(service("memory-care", None)).await.unwrap();
        assert_eq!(svc.id, 1);
        let inq = store.create_inquiry(inquiry("Jane")).await.unwrap();
        assert_eq!(inq.id, 1);
    }

    #[test]
    fn test_exhausted_id_space_is_internal_error() {
        let mut table: Table<String> = Table {
            next_id: EntityId::MAX,
            rows: BTreeMap::new(),
        };

        let err = table.insert_with(|id| format!("row {}", id)).unwrap_err();
        assert!(matches!(err, StoreError::Internal(_)));
        assert!(table.rows.is_empty());
        assert_eq!(table.next_id, EntityId::MAX);
    }

    #[tokio::test]
    async fn test_defaults_are_filled() {
        let store = MemStore::new();

        let svc = store.create_service(service("respite-care", None)).await.unwrap();
        assert!(svc.is_active);
        assert!(svc.image.is_none());
        assert!(svc.features.is_none());

        let t = store.create_testimonial(testimonial("Eleanor")).await.unwrap();
        assert_eq!(t.stars, 5);
        assert!(t.is_active);
        assert!(t.role.is_none());

        let u = store.create_user(user("eleanor")).await.unwrap();
        assert_eq!(u.role, "user");
        assert!(u.full_name.is_none());

        let e = store.create_event(event("Jazz", "2023-05-15")).await.unwrap();
        assert!(e.is_active);
    }

    #[tokio::test]
    async fn test_explicit_values_override_defaults() {
        let store = MemStore::new();

        let t = store
            .create_testimonial(NewTestimonial {
                stars: Some(3),
                is_active: Some(false),
                ..testimonial("Robert")
            })
            .await
            .unwrap();
        assert_eq!(t.stars, 3);
        assert!(!t.is_active);
    }

    #[tokio::test]
    async fn test_inactive_services_are_hidden_from_public_accessors() {
        let store = MemStore::new();
        let active = store.create_service(service("assisted-living", Some(true))).await.unwrap();
        let inactive = store.create_service(service("day-care", Some(false))).await.unwrap();

        let listed = store.list_services().await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, active.id);

        assert!(store.get_service_by_slug("day-care").await.unwrap().is_none());
        assert_eq!(
            store.get_service_by_slug("assisted-living").await.unwrap().unwrap().id,
            active.id
        );

        // Direct lookup by id still sees the inactive record.
        let direct = store.get_service(inactive.id).await.unwrap().unwrap();
        assert!(!direct.is_active);
    }

    #[tokio::test]
    async fn test_inactive_testimonials_and_events_are_not_listed() {
        let store = MemStore::new();
        store.create_testimonial(testimonial("Shown")).await.unwrap();
        let hidden = store
            .create_testimonial(NewTestimonial {
                is_active: Some(false),
                ..testimonial("Hidden")
            })
            .await
            .unwrap();
        store
            .create_event(NewEvent {
                is_active: Some(false),
                ..event("Cancelled", "2023-05-10")
            })
            .await
            .unwrap();

        let testimonials = store.list_testimonials().await.unwrap();
        assert_eq!(testimonials.len(), 1);
        assert_eq!(testimonials[0].name, "Shown");
        assert!(store.get_testimonial(hidden.id).await.unwrap().is_some());

        assert!(store.list_events().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_listings_are_ordered_by_id() {
        let store = MemStore::new();
        for slug in ["c-slug", "a-slug", "b-slug"] {
            store.create_service(service(slug, None)).await.unwrap();
        }

        let slugs: Vec<String> = store
            .list_services()
            .await
            .unwrap()
            .into_iter()
            .map(|s| s.slug)
            .collect();
        assert_eq!(slugs, vec!["c-slug", "a-slug", "b-slug"]);
    }

    #[tokio::test]
    async fn test_events_are_ordered_by_date() {
        let store = MemStore::new();
        store.create_event(event("Garden Club", "2023-05-20")).await.unwrap();
        store.create_event(event("Jazz Night", "2023-05-15")).await.unwrap();
        store.create_event(event("Cooking Demo", "2023-05-18")).await.unwrap();

        let titles: Vec<String> = store
            .list_events()
            .await
            .unwrap()
            .into_iter()
            .map(|e| e.title)
            .collect();
        assert_eq!(titles, vec!["Jazz Night", "Cooking Demo", "Garden Club"]);
    }

    #[tokio::test]
    async fn test_inquiries_are_listed_newest_first() {
        let store = MemStore::with_clock(ticking_clock(may_first()));
        store.create_inquiry(inquiry("First")).await.unwrap();
        store.create_inquiry(inquiry("Second")).await.unwrap();
        store.create_inquiry(inquiry("Third")).await.unwrap();

        let names: Vec<String> = store
            .list_inquiries()
            .await
            .unwrap()
            .into_iter()
            .map(|i| i.name)
            .collect();
        assert_eq!(names, vec!["Third", "Second", "First"]);
    }

    #[tokio::test]
    async fn test_inquiry_timestamp_ties_fall_back_to_id() {
        let store = MemStore::with_clock(fixed_clock(may_first()));
        for name in ["A", "B", "C"] {
            store.create_inquiry(inquiry(name)).await.unwrap();
        }

        let ids: Vec<EntityId> = store
            .list_inquiries()
            .await
            .unwrap()
            .into_iter()
            .map(|i| i.id)
            .collect();
        assert_eq!(ids, vec![3, 2, 1]);
    }

    #[tokio::test]
    async fn test_inquiry_created_at_is_owned_by_store() {
        let stamped = may_first();
        let store = MemStore::with_clock(fixed_clock(stamped));

        let input: NewInquiry = serde_json::from_value(serde_json::json!({
            "name": "Jane",
            "email": "jane@example.com",
            "createdAt": "1999-01-01T00:00:00Z"
        }))
        .unwrap();

        let created = store.create_inquiry(input).await.unwrap();
        assert_eq!(created.created_at, stamped);
        assert_eq!(store.get_inquiry(created.id).await.unwrap().unwrap().created_at, stamped);
    }

    #[tokio::test]
    async fn test_duplicate_username_is_rejected_without_burning_an_id() {
        let store = MemStore::new();
        store.create_user(user("alice")).await.unwrap();

        let err = store.create_user(user("alice")).await.unwrap_err();
        assert!(matches!(err, StoreError::Conflict(_)));

        let next = store.create_user(user("bob")).await.unwrap();
        assert_eq!(next.id, 2);
    }

    #[tokio::test]
    async fn test_duplicate_slug_is_rejected_even_when_inactive() {
        let store = MemStore::new();
        store.create_service(service("memory-care", Some(false))).await.unwrap();

        let err = store
            .create_service(service("memory-care", Some(true)))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Conflict(_)));
        assert_eq!(store.create_service(service("rehab", None)).await.unwrap().id, 2);
    }

    #[tokio::test]
    async fn test_username_lookup_is_exact() {
        let store = MemStore::new();
        let created = store.create_user(user("Alice")).await.unwrap();

        assert_eq!(
            store.get_user_by_username("Alice").await.unwrap().unwrap().id,
            created.id
        );
        assert!(store.get_user_by_username("alice").await.unwrap().is_none());
        assert!(store.get_user(created.id).await.unwrap().is_some());
        assert!(store.get_user(99).await.unwrap().is_none());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_creates_get_unique_ids() {
        let store = Arc::new(MemStore::new());

        let handles: Vec<_> = (0..64)
            .map(|i| {
                let store = Arc::clone(&store);
                tokio::spawn(async move {
                    store.create_inquiry(inquiry(&format!("N{}", i))).await.unwrap().id
                })
            })
            .collect();

        let mut ids = HashSet::new();
        for handle in handles {
            ids.insert(handle.await.unwrap());
        }

        let expected: HashSet<EntityId> = (1..=64).collect();
        assert_eq!(ids, expected);
    }
}
