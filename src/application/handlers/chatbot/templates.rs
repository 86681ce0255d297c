//! Reply templates for the dialog engine.
//!
//! Pure text builders. Keyword-driven templates inspect the raw message in
//! lower case; the composer decides which one to call.

use crate::domain::conversation::{Preferences, Requirement};
use crate::domain::property::Property;

const CRORE: u64 = 10_000_000;
const LAKH: u64 = 100_000;

/// Amenities shown per listing in a result summary.
const SUMMARY_AMENITIES: usize = 3;

pub const GREETING_PREFIX: &str = "Hello! Welcome to Realty Concierge. ";

pub const APOLOGY: &str = "I'm sorry, I'm having trouble answering that right now. \
You can tell me your budget, preferred city, property type and number of bedrooms \
and I'll find matching listings for you.";

pub const SEARCH_UNAVAILABLE: &str = "I'm sorry, I couldn't reach our listings right now. \
Please try again in a moment.";

/// Formats an INR amount in crore/lakh units.
pub fn format_price(amount: u64) -> String {
    if amount >= CRORE {
        format!("₹{:.2} Cr", amount as f64 / CRORE as f64)
    } else if amount >= LAKH {
        format!("₹{:.2} Lakh", amount as f64 / LAKH as f64)
    } else {
        format!("₹{}", amount)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Search
// ─────────────────────────────────────────────────────────────────────────────

pub fn needs_criteria() -> String {
    "I'd love to help you find a property! To get started, tell me a little about \
what you're looking for, such as your budget, preferred city, property type \
(flat, villa, house, plot...) and how many bedrooms you need."
        .to_string()
}

pub fn no_results(preferences: &Preferences) -> String {
    let mut reply = String::from("I couldn't find any available properties matching ");
    reply.push_str(&describe_preferences(preferences));
    reply.push_str(
        ". Would you like me to broaden the search? You could try a higher budget, \
a nearby area, or fewer bedrooms.",
    );
    reply
}

pub fn search_results(properties: &[Property]) -> String {
    let mut reply = format!(
        "I found {} {} that match your requirements:\n",
        properties.len(),
        if properties.len() == 1 { "property" } else { "properties" }
    );
    for (index, property) in properties.iter().enumerate() {
        reply.push('\n');
        reply.push_str(&property_summary(index + 1, property));
    }
    reply.push_str(
        "\nReply with a property number (for example \"tell me more about property 1\") \
to see full details, or ask me to schedule a visit.",
    );
    reply
}

fn property_summary(number: usize, property: &Property) -> String {
    let mut line = format!(
        "{}. {}\n   📍 {}, {}\n   💰 {}\n   🛏 {} bed · 🛁 {} bath",
        number,
        property.title,
        property.location.address,
        property.location.city,
        format_price(property.price),
        property.bedrooms,
        property.bathrooms,
    );
    if let Some(area) = property.area_sqft {
        line.push_str(&format!(" · 📐 {} sq.ft", area));
    }
    if !property.amenities.is_empty() {
        let shown: Vec<&str> = property
            .amenities
            .iter()
            .take(SUMMARY_AMENITIES)
            .map(String::as_str)
            .collect();
        line.push_str(&format!("\n   ✨ {}", shown.join(", ")));
    }
    line.push_str(&format!(
        "\n   👤 Contact: {}\n   🔗 Ref: {}\n",
        property.contact.name, property.id
    ));
    line
}

/// Full listing card for a details request.
pub fn property_card(property: &Property) -> String {
    let mut card = format!(
        "Here are the details for {}:\n\n{}\n\n📍 {}, {}",
        property.title, property.description, property.location.address, property.location.city
    );
    if let Some(area) = &property.location.area {
        card.push_str(&format!(" ({})", area));
    }
    if let Some(state) = &property.location.state {
        card.push_str(&format!(", {}", state));
    }
    card.push_str(&format!(
        "\n🏠 Type: {}\n💰 Price: {}\n🛏 Bedrooms: {}\n🛁 Bathrooms: {}",
        property.property_type,
        format_price(property.price),
        property.bedrooms,
        property.bathrooms
    ));
    if let Some(area) = property.area_sqft {
        card.push_str(&format!("\n📐 Built-up area: {} sq.ft", area));
    }
    if !property.amenities.is_empty() {
        card.push_str(&format!("\n✨ Amenities: {}", property.amenities.join(", ")));
    }
    card.push_str(&format!("\n👤 Contact: {}", property.contact.name));
    if let Some(phone) = &property.contact.phone {
        card.push_str(&format!(" · {}", phone));
    }
    if let Some(email) = &property.contact.email {
        card.push_str(&format!(" · {}", email));
    }
    card.push_str("\n\nWould you like to schedule a visit or discuss the price?");
    card
}

// ─────────────────────────────────────────────────────────────────────────────
// Requirements gathering
// ─────────────────────────────────────────────────────────────────────────────

pub fn gather_requirements(missing: &[Requirement]) -> String {
    let mut reply = String::from(
        "Great, let's find you the right property. Could you tell me a bit more? I still need:\n",
    );
    for requirement in missing {
        reply.push_str(&format!("\n• Your {}", requirement));
        reply.push_str(match requirement {
            Requirement::Budget => " (e.g. \"under 80 lakh\" or \"1-1.5 crore\")",
            Requirement::Location => " (e.g. \"in Rajkot\")",
            Requirement::PropertyType => " (flat, apartment, villa, house, plot...)",
            Requirement::Bedrooms => " (e.g. \"3 BHK\")",
        });
    }
    reply
}

pub fn ready_to_search(preferences: &Preferences) -> String {
    format!(
        "Perfect! I have everything I need: {}. Shall I search for matching properties now?",
        describe_preferences(preferences)
    )
}

/// Short human-readable summary of the merged criteria.
pub fn describe_preferences(preferences: &Preferences) -> String {
    let mut parts = Vec::new();
    if let Some(bedrooms) = preferences.bedrooms {
        parts.push(format!("{} BHK", bedrooms));
    }
    match preferences.property_type {
        Some(property_type) => parts.push(property_type.to_string()),
        None => parts.push("properties".to_string()),
    }
    if let Some(city) = &preferences.location.city {
        parts.push(format!("in {}", city));
    }
    match (preferences.budget.min, preferences.budget.max) {
        (Some(min), Some(max)) if min == max => parts.push(format!("around {}", format_price(max))),
        (Some(min), Some(max)) => parts.push(format!(
            "between {} and {}",
            format_price(min),
            format_price(max)
        )),
        (None, Some(max)) => parts.push(format!("up to {}", format_price(max))),
        (Some(min), None) => parts.push(format!("from {}", format_price(min))),
        (None, None) => {}
    }
    if !preferences.amenities.is_empty() {
        let amenities: Vec<&str> = preferences.amenities.iter().map(String::as_str).collect();
        parts.push(format!("with {}", amenities.join(", ")));
    }
    parts.join(" ")
}

// ─────────────────────────────────────────────────────────────────────────────
// Keyword templates
// ─────────────────────────────────────────────────────────────────────────────

fn mentions(text: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| text.contains(k))
}

pub fn details(text: &str) -> String {
    let text = text.to_lowercase();
    if mentions(&text, &["amenit", "facilit"]) {
        "Each listing shows its key amenities. Tell me which property number you're \
interested in and I'll share the complete amenity list."
            .to_string()
    } else if mentions(&text, &["location", "neighbo", "area", "nearby"]) {
        "I can share the exact address and locality for any listing. Which property \
number would you like to know about?"
            .to_string()
    } else if mentions(&text, &["price", "cost", "rate"]) {
        "Prices are listed with every result. Let me know the property number and I'll \
give you the full breakdown, or we can talk about negotiating."
            .to_string()
    } else {
        "Which property would you like to know more about? Reply with its number from \
the results, for example \"details of property 2\"."
            .to_string()
    }
}

pub fn negotiation(text: &str) -> String {
    let text = text.to_lowercase();
    if mentions(&text, &["discount", "lower", "reduce"]) {
        "Sellers are often open to a reasonable discount, typically 3-5% depending on \
the market. Which property are you interested in? I can pass your request to the owner."
            .to_string()
    } else if mentions(&text, &["offer"]) {
        "Happy to help you make an offer! Share the property number and the amount you \
have in mind, and I'll forward it to the owner or agent."
            .to_string()
    } else if mentions(&text, &["expensive", "costly", "high"]) {
        "I understand the price feels high. I can look for similar properties in a lower \
range, or help you negotiate on this one. What would you prefer?"
            .to_string()
    } else {
        "Let's see what we can do on price. Tell me which property you're considering and \
your target budget, and I'll connect you with the seller to negotiate."
            .to_string()
    }
}

pub fn visit(text: &str) -> String {
    let text = text.to_lowercase();
    if mentions(&text, &["today", "tomorrow"]) {
        "I'll check availability for a visit at short notice. Which property would you \
like to see, and what time suits you?"
            .to_string()
    } else if mentions(&text, &["weekend", "saturday", "sunday"]) {
        "Weekend visits are popular, so let's book early! Which property and which time \
slot (morning, afternoon or evening) works for you?"
            .to_string()
    } else {
        "I'd be happy to arrange a site visit. Please share the property number, your \
preferred date and time, and a contact number so the agent can confirm."
            .to_string()
    }
}

pub fn platform(text: &str) -> String {
    let text = text.to_lowercase();
    if mentions(&text, &["sign up", "signup", "register", "create account", "join"]) {
        "Signing up is free! Click \"Sign Up\" at the top of the page, enter your name, \
email and phone number, and verify your email. You can then save properties and \
track your visits."
            .to_string()
    } else if mentions(
        &text,
        &["contact", "reach", "phone", "email", "support", "customer care"],
    ) {
        "You can reach our support team at support@realtyconcierge.in or call \
+91 1800 123 4567 (Mon-Sat, 9 AM to 7 PM). I'm also here around the clock to help \
you search."
            .to_string()
    } else if mentions(&text, &["how", "work"]) {
        "It's simple: tell me what you're looking for (budget, city, property type and \
bedrooms), I'll show matching listings, and I can help you get details, negotiate \
and schedule visits, all in this chat."
            .to_string()
    } else if mentions(&text, &["fee", "charge", "commission", "pricing", "cost"]) {
        "Searching and chatting with me is completely free for buyers and tenants. \
Any brokerage is agreed directly with the listing agent and shown upfront."
            .to_string()
    } else if mentions(&text, &["about", "who are you", "what is this", "platform"]) {
        "I'm Realty Concierge, a property search assistant. I help you find flats, \
villas, houses and plots that match your budget and location, and connect you with \
sellers."
            .to_string()
    } else {
        "I'm here to help with anything about our platform or your property search. \
You can ask how it works, how to sign up, or how to contact us."
            .to_string()
    }
}

/// Template for small talk; `None` when no keyword covers the message.
pub fn general(text: &str) -> Option<String> {
    let text = text.to_lowercase();
    if mentions(&text, &["thank"]) {
        Some(
            "You're welcome! Let me know whenever you'd like to continue your property search."
                .to_string(),
        )
    } else if mentions(&text, &["bye", "goodbye", "see you"]) {
        Some("Goodbye! Your preferences are saved, so we can pick up right where we left off.".to_string())
    } else if mentions(&text, &["help", "what can you do"]) {
        Some(
            "I can search properties by budget, city, type and bedrooms, show listing \
details, help you negotiate prices and schedule site visits. What are you looking for?"
                .to_string(),
        )
    } else {
        None
    }
}

/// Fallback when nothing else applies, e.g. a bare greeting.
pub fn welcome() -> String {
    "I can help you find your next home or investment. What kind of property are you \
looking for?"
        .to_string()
}
