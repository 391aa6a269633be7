//! Copy and asset references of the landing page.

use std::sync::LazyLock;

use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct Hero {
    pub title: String,
    pub tagline: String,
    pub cta_label: String,
    pub image_url: String,
    pub image_alt: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Feature {
    pub icon: String,
    pub title: String,
    pub body: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct About {
    pub heading: String,
    pub paragraphs: Vec<String>,
    pub closing: String,
    pub founder_name: String,
    pub founder_role: String,
    pub photo_url: String,
    pub photo_alt: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ServiceList {
    pub title: String,
    pub items: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Testimonial {
    pub stars: u8,
    pub quote: String,
    pub author: String,
    pub location: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CallToAction {
    pub heading: String,
    pub body: String,
    pub button_label: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Footer {
    pub tagline: String,
    pub email: String,
    pub phone: String,
    pub service_areas: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LandingPage {
    pub brand: String,
    pub hero: Hero,
    pub features: Vec<Feature>,
    pub about: About,
    pub services_heading: String,
    pub services: Vec<ServiceList>,
    pub testimonial: Testimonial,
    pub contact: CallToAction,
    pub footer: Footer,
}

static LANDING: LazyLock<LandingPage> = LazyLock::new(build_landing);

pub fn landing_page() -> &'static LandingPage {
    &LANDING
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

fn feature(icon: &str, title: &str, body: &str) -> Feature {
    Feature {
        icon: icon.into(),
        title: title.into(),
        body: body.into(),
    }
}

fn build_landing() -> LandingPage {
    LandingPage {
        brand: "The Dragonfly Effect".into(),
        hero: Hero {
            title: "The Dragonfly Effect".into(),
            tagline: "Elevating your living space with white-glove cleaning services".into(),
            cta_label: "Schedule Consultation".into(),
            image_url: "https://images.unsplash.com/photo-1600607687939-ce8a6c25118c?auto=format&fit=crop&q=80".into(),
            image_alt: "Luxury Interior".into(),
        },
        features: vec![
            feature(
                "shield",
                "Fully Insured",
                "Premium service backed by comprehensive insurance coverage",
            ),
            feature(
                "sparkles",
                "White Glove Service",
                "Meticulous attention to detail in every corner",
            ),
            feature(
                "clock",
                "Flexible Scheduling",
                "Available at your convenience, 7 days a week",
            ),
        ],
        about: About {
            heading: "A Story of Transformation".into(),
            paragraphs: strings(&[
                "Like the dragonfly's journey from water to air, my path to founding The Dragonfly Effect was one of profound transformation. What began as a personal mission to overcome life's challenges evolved into a vision of helping others create spaces of serenity and order.",
                "Drawing from my own experience of rebuilding and reinvention, I understood that a truly clean space isn't just about appearance. It's about creating an environment where transformation and growth can flourish.",
            ]),
            closing: "Today, The Dragonfly Effect represents more than a cleaning service. It's a testament to the power of transformation, and our commitment to helping our clients achieve harmony in their homes and lives.".into(),
            founder_name: "Karen".into(),
            founder_role: "Founder & CEO".into(),
            photo_url: "https://images.unsplash.com/photo-1573496359142-b8d87734a5a2?auto=format&fit=crop&q=80".into(),
            photo_alt: "Karen, Founder of The Dragonfly Effect".into(),
        },
        services_heading: "Our Premium Services".into(),
        services: vec![
            ServiceList {
                title: "Regular Maintenance".into(),
                items: strings(&[
                    "Deep cleaning of all surfaces",
                    "Premium eco-friendly products",
                    "Customized cleaning plans",
                ]),
            },
            ServiceList {
                title: "Special Services".into(),
                items: strings(&[
                    "Move-in/move-out cleaning",
                    "Event preparation & cleanup",
                    "Seasonal deep cleaning",
                ]),
            },
        ],
        testimonial: Testimonial {
            stars: 5,
            quote: "The Dragonfly Effect has transformed how I maintain my home. Their attention to detail and professional service is unmatched.".into(),
            author: "Sarah Thompson".into(),
            location: "Pacific Heights".into(),
        },
        contact: CallToAction {
            heading: "Experience the Difference".into(),
            body: "Contact us to schedule your personalized consultation".into(),
            button_label: "Get Started".into(),
        },
        footer: Footer {
            tagline: "Luxury cleaning services for discerning clients".into(),
            email: "contact@dragonflyeffect.com".into(),
            phone: "(415) 555-0123".into(),
            service_areas: strings(&["San Francisco Bay Area", "Peninsula & Silicon Valley"]),
        },
    }
}
