//! Fixture content loaded at process start.

use super::{ContentStore, StoreError};
use crate::models::{parse_event_date, NewEvent, NewService, NewTestimonial};

const TESTIMONIAL_IMAGE_PARAMS: &str =
    "ixlib=rb-4.0.3&ixid=MnwxMjA3fDB8MHxwaG90by1wYWdlfHx8fGVufDB8fHx8&auto=format&fit=crop&w=200&q=80";
const CARD_IMAGE_PARAMS: &str =
    "ixlib=rb-4.0.3&ixid=MnwxMjA3fDB8MHxwaG90by1wYWdlfHx8fGVufDB8fHx8&auto=format&fit=crop&w=700&q=80";

fn unsplash(photo: &str, params: &str) -> Option<String> {
    Some(format!("https://images.unsplash.com/{}?{}", photo, params))
}

fn features(items: &[&str]) -> Option<Vec<String>> {
    Some(items.iter().map(|s| s.to_string()).collect())
}

fn fixture_testimonials() -> Vec<NewTestimonial> {
    vec![
        NewTestimonial {
            name: "Eleanor J.".to_string(),
            role: Some("Resident since 2021".to_string()),
            content: "Moving to Devine was the best decision. The staff treats me like family, and I've made wonderful friends. The activities keep me engaged and I feel healthier than I have in years.".to_string(),
            image: unsplash("photo-1566616213894-2d4e1baee5d8", TESTIMONIAL_IMAGE_PARAMS),
            stars: Some(5),
            is_active: Some(true),
        },
        NewTestimonial {
            name: "Susan M.".to_string(),
            role: Some("Daughter of Resident".to_string()),
            content: "The peace of mind we've gained knowing Dad is in such good hands is priceless. The staff communicates with us regularly, and his care plan is exactly what he needs. We couldn't be happier with our choice.".to_string(),
            image: unsplash("photo-1508214751196-bcfd4ca60f91", TESTIMONIAL_IMAGE_PARAMS),
            stars: Some(5),
            is_active: Some(true),
        },
        NewTestimonial {
            name: "Robert T.".to_string(),
            role: Some("Resident since 2020".to_string()),
            content: "After my wife passed, I was hesitant about moving into a community. Now I can't imagine being anywhere else. The care is exceptional, and the dining is superb. I feel like I'm in a luxury resort with healthcare.".to_string(),
            image: unsplash("photo-1553867745-6e038d085e86", TESTIMONIAL_IMAGE_PARAMS),
            stars: Some(5),
            is_active: Some(true),
        },
    ]
}

fn fixture_services() -> Vec<NewService> {
    let service = |title: &str, description: &str, feats: &[&str], photo: &str, slug: &str| {
        NewService {
            title: title.to_string(),
            description: description.to_string(),
            image: unsplash(photo, CARD_IMAGE_PARAMS),
            slug: slug.to_string(),
            features: features(feats),
            is_active: Some(true),
        }
    };

    vec![
        service(
            "Assisted Living",
            "Independent lifestyle with personalized assistance for daily activities in a supportive community.",
            &["Medication management", "Bathing and dressing assistance", "Mobility support"],
            "photo-1576091160550-2173dba999ef",
            "assisted-living",
        ),
        service(
            "Memory Care",
            "Specialized care for those with Alzheimer's and dementia in a secure, engaging environment.",
            &["24/7 specialized supervision", "Cognitive stimulation activities", "Secure living environment"],
            "photo-1559839734-2b71ea197ec2",
            "memory-care",
        ),
        service(
            "Skilled Nursing",
            "24-hour medical care from licensed nurses and therapists for complex health needs.",
            &["Post-surgery recovery", "Chronic condition management", "Wound care"],
            "photo-1607962837359-5e7e89f86776",
            "skilled-nursing",
        ),
        service(
            "Rehabilitation",
            "Comprehensive therapy services to recover function and independence after illness or surgery.",
            &["Physical therapy", "Occupational therapy", "Speech therapy"],
            "photo-1581056771107-24247a734e15",
            "rehabilitation",
        ),
        service(
            "Respite Care",
            "Short-term care providing a break for family caregivers while ensuring quality care continues.",
            &["Flexible stays (days to weeks)", "Full access to amenities", "Personalized care plan"],
            "photo-1505576399279-565b52d4ac71",
            "respite-care",
        ),
        service(
            "Wellness Programs",
            "Comprehensive health and wellness initiatives that promote active, fulfilling senior living.",
            &["Fitness classes", "Nutrition counseling", "Mindfulness practices"],
            "photo-1511688878353-3a2f5be94cd7",
            "wellness-programs",
        ),
    ]
}

fn fixture_events() -> Result<Vec<NewEvent>, StoreError> {
    let event = |title: &str,
                 description: &str,
                 photo: &str,
                 date: &str,
                 start: &str,
                 end: &str|
     -> Result<NewEvent, StoreError> {
        let date = parse_event_date(date)
            .ok_or_else(|| StoreError::Internal(format!("Invalid fixture date '{}'", date)))?;
        Ok(NewEvent {
            title: title.to_string(),
            description: description.to_string(),
            image: unsplash(photo, CARD_IMAGE_PARAMS),
            date,
            start_time: Some(start.to_string()),
            end_time: Some(end.to_string()),
            is_active: Some(true),
        })
    };

    Ok(vec![
        event(
            "Live Jazz Night",
            "Join us for an evening of classic jazz performed by the Silver City Quartet in our main lounge.",
            "photo-1470225620780-dba8ba36b745",
            "2023-05-15",
            "19:00",
            "21:00",
        )?,
        event(
            "Cooking Demo",
            "Our executive chef will demonstrate Mediterranean cuisine techniques with tasting samples for all attendees.",
            "photo-1585211969224-3e992986159d",
            "2023-05-18",
            "14:00",
            "15:30",
        )?,
        event(
            "Garden Club",
            "Participate in our seasonal planting in the community garden followed by refreshments on the terrace.",
            "photo-1525026198548-4baa812f1183",
            "2023-05-20",
            "10:00",
            "11:30",
        )?,
    ])
}

/// Load the fixture testimonials, services and events into `store`.
///
/// Goes through the ordinary `create_*` operations, so an empty store ends up
/// with ids 1..N in fixture order.
pub async fn seed_fixtures(store: &dyn ContentStore) -> Result<(), StoreError> {
    let testimonials = fixture_testimonials();
    let services = fixture_services();
    let events = fixture_events()?;
    let counts = (testimonials.len(), services.len(), events.len());

    for testimonial in testimonials {
        store.create_testimonial(testimonial).await?;
    }
    for service in services {
        store.create_service(service).await?;
    }
    for event in events {
        store.create_event(event).await?;
    }

    tracing::info!(
        testimonials = counts.0,
        services = counts.1,
        events = counts.2,
        "Seeded fixture content"
    );
    Ok(())
}
