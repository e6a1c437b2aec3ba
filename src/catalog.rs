use crate::data_models::{Feature, PricingPlan};

/// Fixed marketing content served by `/api/features` and `/api/pricing`.
#[derive(Debug, Clone)]
pub struct Catalog {
    pub features: Vec<Feature>,
    pub plans: Vec<PricingPlan>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self {
            features: default_features(),
            plans: default_plans(),
        }
    }
}

fn feature(id: &str, icon: &str, title: &str, description: &str) -> Feature {
    Feature {
        id: id.to_string(),
        icon: icon.to_string(),
        title: title.to_string(),
        description: description.to_string(),
    }
}

fn default_features() -> Vec<Feature> {
    vec![
        feature(
            "1",
            "Zap",
            "Lightning Fast",
            "10ms response times globally. Our infrastructure is optimized for speed so your APIs are always responsive.",
        ),
        feature(
            "2",
            "ShieldCheck",
            "Built-in Security",
            "Industry-standard authentication and authorization with JWT, OAuth, and API keys out of the box.",
        ),
        feature(
            "3",
            "Network",
            "RESTful & GraphQL",
            "Support for both RESTful APIs and GraphQL in one unified platform. No compromises.",
        ),
    ]
}

const PLAIN_BUTTON: &str = "bg-gray-700 hover:bg-gray-600";
const PLAIN_BORDER: &str = "border-gray-700";

fn plan(id: &str, name: &str, price: &str, features: &[&str]) -> PricingPlan {
    PricingPlan {
        id: id.to_string(),
        name: name.to_string(),
        price: price.to_string(),
        price_suffix: "/month".to_string(),
        features: features.iter().map(|f| f.to_string()).collect(),
        button_text: "Get Started".to_string(),
        cta_link: "#".to_string(),
        bg_color: "bg-gray-800".to_string(),
        text_color: "text-white".to_string(),
        button_color: PLAIN_BUTTON.to_string(),
        border_color: PLAIN_BORDER.to_string(),
        recommended: false,
    }
}

fn default_plans() -> Vec<PricingPlan> {
    let starter = plan(
        "starter",
        "Starter",
        "$0",
        &[
            "1,000 API calls/month",
            "Basic rate limiting",
            "Community support",
            "Basic analytics",
        ],
    );
    let pro = PricingPlan {
        button_color: "bg-blue-600 hover:bg-blue-700".to_string(),
        border_color: "border-blue-600".to_string(),
        recommended: true,
        ..plan(
            "pro",
            "Pro",
            "$49",
            &[
                "100,000 API calls/month",
                "Advanced rate limiting",
                "Priority support",
                "Advanced analytics",
                "Custom domains",
            ],
        )
    };
    let enterprise = plan(
        "enterprise",
        "Enterprise",
        "$199",
        &[
            "Unlimited API calls",
            "Custom rate limiting",
            "24/7 dedicated support",
            "Advanced analytics",
            "Custom domains",
            "SLA guarantee",
        ],
    );
    vec![starter, pro, enterprise]
}
