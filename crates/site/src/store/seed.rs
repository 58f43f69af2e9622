//! Built-in dataset used when storage holds nothing for a key.

use noievoi_core::{
    AdminUser, ChatbotCharacter, ChatbotConfig, ChatbotQuestion, ContentBody, ContentItem, Email,
    Gender, Page, Project, Step, TeamMember,
};

use crate::services::auth::{AuthError, hash_password};

/// Email of the seeded admin account.
pub const SEED_ADMIN_EMAIL: &str = "admin@noievoi.com";
/// Password of the seeded admin account.
pub const SEED_ADMIN_PASSWORD: &str = "admin123";

const UNSPLASH_QUERY: &str = "?ixlib=rb-4.0.3&ixid=M3wxMjA3fDB8MHxwaG90by1wYWdlfHx8fGVufDB8fHx8fA%3D%3D&auto=format&fit=crop";

fn unsplash(photo: &str, width: u32) -> String {
    format!("https://images.unsplash.com/photo-{photo}{UNSPLASH_QUERY}&w={width}&q=80")
}

fn step(id: &str, title: &str, description: &str) -> Step {
    Step {
        id: id.into(),
        title: title.to_owned(),
        description: description.to_owned(),
    }
}

fn team_member(
    id: &str,
    name: &str,
    role: &str,
    photo: &str,
    bio: &str,
    project: Project,
) -> ContentItem {
    ContentItem::new(
        ContentBody::Team(TeamMember {
            name: name.to_owned(),
            role: role.to_owned(),
            bio: bio.to_owned(),
            projects: vec![project],
        }),
        name,
        unsplash(photo, 987),
    )
    .with_id(id)
    .on_page(Page::Team)
}

fn project(id: &str, title: &str, description: &str, photo: &str) -> Project {
    Project {
        id: id.into(),
        title: title.to_owned(),
        description: description.to_owned(),
        image_src: unsplash(photo, 2070),
    }
}

fn hero(
    id: &str,
    page: Page,
    small_text: &str,
    title: &str,
    description: &str,
    image: String,
) -> ContentItem {
    ContentItem::new(
        ContentBody::Hero {
            small_text: Some(small_text.to_owned()),
        },
        title,
        image,
    )
    .with_id(id)
    .with_description(description)
    .on_page(page)
}

/// The seed page content, in display order.
#[must_use]
pub fn content() -> Vec<ContentItem> {
    vec![
        ContentItem::new(
            ContentBody::About,
            "International Experts in Diverse Industries",
            unsplash("1497366811353-6870744d04b2", 2069),
        )
        .with_id("about")
        .with_description(
            "At noievoi, we bring together specialists from around the globe to provide innovative solutions for complex challenges. Our extensive network of professionals spans multiple industries, ensuring that we deliver comprehensive expertise tailored to your specific needs.",
        )
        .on_page(Page::Home),
        ContentItem::new(
            ContentBody::Service,
            "Strategic Consulting",
            unsplash("1534551767192-78b8dd45b51b", 2070),
        )
        .with_id("service-1")
        .with_description(
            "Our strategic consulting services help businesses identify growth opportunities, optimize operations, and develop robust plans for the future.",
        )
        .on_page(Page::Services),
        ContentItem::new(
            ContentBody::Service,
            "Digital Transformation",
            unsplash("1550751827-4bd374c3f58b", 2070),
        )
        .with_id("service-2")
        .with_description(
            "Navigate the digital landscape with confidence. We help organizations implement cutting-edge technologies and practices to stay competitive.",
        )
        .on_page(Page::Services),
        ContentItem::new(
            ContentBody::Service,
            "Market Entry Strategy",
            unsplash("1460925895917-afdab827c52f", 2015),
        )
        .with_id("service-3")
        .with_description(
            "Expand your business into new markets with our comprehensive market entry strategies, tailored to regional nuances and opportunities.",
        )
        .on_page(Page::Services),
        team_member(
            "team-1",
            "Alex Morgan",
            "CEO & Founder",
            "1560250097-0b93528c311a",
            "Alex brings over 15 years of experience in international business development and strategic leadership. Before founding noievoi, he led global expansion efforts for several Fortune 500 companies.",
            project(
                "project-1",
                "Global Market Expansion",
                "Led a team that successfully entered 5 new international markets, resulting in 30% revenue growth within the first year.",
                "1551288049-bebda4e38f71",
            ),
        ),
        team_member(
            "team-2",
            "Sophia Chen",
            "Chief Strategy Officer",
            "1573496359142-b8d87734a5a2",
            "Sophia is a strategic thinker with a background in management consulting at top firms. She specializes in helping organizations navigate complex market challenges and identify growth opportunities.",
            project(
                "project-2",
                "Digital Transformation Initiative",
                "Developed and implemented a comprehensive digital transformation strategy for a traditional manufacturing company, leading to 40% efficiency improvements.",
                "1519389950473-47ba0277781c",
            ),
        ),
        team_member(
            "team-3",
            "Daniel Kim",
            "Head of Technology",
            "1519085360753-af0119f7cbe7",
            "Daniel leads our technology initiatives with over a decade of experience in IT strategy and implementation. His expertise spans artificial intelligence, cloud computing, and cybersecurity.",
            project(
                "project-3",
                "AI-Powered Analytics Platform",
                "Developed a proprietary analytics platform that uses machine learning to provide predictive insights, now used by multiple Fortune 1000 clients.",
                "1555949963-ff9fe0c870eb",
            ),
        ),
        ContentItem::new(
            ContentBody::Approach {
                steps: vec![
                    step(
                        "step-1",
                        "Analyze",
                        "We thoroughly analyze your business needs, challenges, and opportunities to establish a solid foundation for our work.",
                    ),
                    step(
                        "step-2",
                        "Strategize",
                        "Our team develops comprehensive strategies that align with your goals and leverage our global expertise.",
                    ),
                    step(
                        "step-3",
                        "Implement",
                        "We work with you to implement solutions, providing guidance and support throughout the entire process.",
                    ),
                ],
            },
            "Our Approach",
            unsplash("1517245386807-bb43f82c33c4", 2070),
        )
        .with_id("approach")
        .with_description(
            "We believe in a collaborative approach that combines deep industry knowledge with innovative thinking. Our international network of experts allows us to tackle complex challenges from multiple perspectives, delivering solutions that are both comprehensive and tailored to your specific context.",
        )
        .on_page(Page::Home),
        ContentItem::new(
            ContentBody::Network {
                regions: ["North America", "Europe", "Asia Pacific", "Middle East"]
                    .map(String::from)
                    .to_vec(),
            },
            "Our Network",
            unsplash("1599059813005-11265ba4b4ce", 2070),
        )
        .with_id("network")
        .with_description(
            "With contacts spanning across multiple continents and industries, we connect you to the right expertise when you need it most. Our global network includes specialists in technology, finance, healthcare, manufacturing, and more.",
        )
        .on_page(Page::Home),
        ContentItem::new(
            ContentBody::Contact {
                email: Some(Email::from_trusted("careers@noievoi.com")),
            },
            "Join Our Team",
            unsplash("1600880292203-757bb62b4baf", 2070),
        )
        .with_id("contact")
        .with_description(
            "We're always looking for talented individuals who share our passion for excellence and innovation. If you're interested in joining our team, please reach out with your qualifications and areas of expertise.",
        )
        .on_page(Page::Team),
        hero(
            "home-hero",
            Page::Home,
            "ABOUT US",
            "International Experts in Diverse Industries",
            "At noievoi, we bring together specialists from around the globe to provide innovative solutions for complex challenges.",
            unsplash("1497366811353-6870744d04b2", 2069),
        ),
        hero(
            "services-hero",
            Page::Services,
            "SERVICES",
            "Our Services",
            "Tailored solutions to meet your business needs across various industries and challenges.",
            "https://images.unsplash.com/photo-1661956602868-6ae368943878?ixlib=rb-4.0.3&ixid=M3wxMjA3fDF8MHxwaG90by1wYWdlfHx8fGVufDB8fHx8fA%3D%3D&auto=format&fit=crop&w=2070&q=80"
                .to_owned(),
        ),
        hero(
            "team-hero",
            Page::Team,
            "TEAM",
            "Our Team",
            "Meet our diverse group of experts with extensive experience across multiple industries.",
            unsplash("1522071820081-009f0129c71c", 2070),
        ),
    ]
}

fn character(id: &str, name: &str, gender: Gender, photo: &str, width: u32) -> ChatbotCharacter {
    ChatbotCharacter {
        id: id.into(),
        name: name.to_owned(),
        gender,
        avatar_url: unsplash(photo, width),
    }
}

fn question(id: &str, question: &str, answer: &str) -> ChatbotQuestion {
    ChatbotQuestion {
        id: id.into(),
        ..ChatbotQuestion::new(question, answer)
    }
}

/// The seed chatbot configuration.
#[must_use]
pub fn chatbot_config() -> ChatbotConfig {
    ChatbotConfig {
        enabled: true,
        selected_character: "char-1".into(),
        welcome_message: "Hello! How can I help you today?".to_owned(),
        characters: vec![
            character("char-1", "Alex", Gender::Male, "1568602471122-7832951cc4c5", 2070),
            character("char-2", "Mike", Gender::Male, "1557862921-37829c790f19", 2071),
            character("char-3", "Sarah", Gender::Female, "1544005313-94ddf0286df2", 988),
        ],
        questions: vec![
            question(
                "q-1",
                "What services do you offer?",
                "We offer strategic consulting, digital transformation, and market entry strategy services. You can find more details on our Services page.",
            ),
            question(
                "q-2",
                "How can I contact your team?",
                "You can reach us through the contact form on our website or by sending an email to contact@noievoi.com.",
            ),
            question(
                "q-3",
                "Where are you located?",
                "We have a global presence with team members across North America, Europe, Asia Pacific, and the Middle East.",
            ),
        ],
    }
}

/// The seed admin accounts.
///
/// # Errors
///
/// Returns `AuthError::PasswordHash` if the seed password cannot be hashed.
pub fn admin_users() -> Result<Vec<AdminUser>, AuthError> {
    Ok(vec![AdminUser {
        email: Email::from_trusted(SEED_ADMIN_EMAIL),
        password_hash: hash_password(SEED_ADMIN_PASSWORD)?,
        name: Some("Admin User".to_owned()),
    }])
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use std::collections::HashSet;

    use noievoi_core::{ContentType, content::filter_by_page};

    use super::*;

    #[test]
    fn test_seed_ids_are_unique() {
        let items = content();
        let ids: HashSet<_> = items.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids.len(), items.len());
    }

    #[test]
    fn test_every_seed_item_lands_on_one_page() {
        let items = content();
        let total: usize = Page::ALL
            .into_iter()
            .map(|page| filter_by_page(&items, page).count())
            .sum();
        assert_eq!(total, items.len());
    }

    #[test]
    fn test_each_page_has_a_hero() {
        let items = content();
        for page in [Page::Home, Page::Services, Page::Team] {
            assert!(
                filter_by_page(&items, page).any(|i| i.kind() == ContentType::Hero),
                "{page} has no hero"
            );
        }
    }

    #[test]
    fn test_selected_character_exists() {
        let config = chatbot_config();
        assert_eq!(config.active_character().unwrap().id, config.selected_character);
    }

    #[test]
    fn test_seed_admin_password_verifies() {
        let admins = admin_users().unwrap();
        assert_eq!(admins.len(), 1);
        assert!(
            crate::services::auth::verify_password(SEED_ADMIN_PASSWORD, &admins[0].password_hash)
                .is_ok()
        );
    }
}
