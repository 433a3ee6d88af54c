//! Agent card describing the investment agent's skills

use agent_core::{AgentCapabilities, AgentCard, AgentSkill};

fn skill(id: &str, name: &str, description: &str, tags: &[&str], examples: &[&str]) -> AgentSkill {
    AgentSkill {
        id: id.into(),
        name: name.into(),
        description: description.into(),
        tags: tags.iter().map(|t| (*t).to_string()).collect(),
        examples: examples.iter().map(|e| (*e).to_string()).collect(),
    }
}

/// Build the card advertised at `url`
pub fn create_agent_card(url: impl Into<String>) -> AgentCard {
    let skills = vec![
        skill(
            "portfolio_management",
            "Portfolio Management and Diversification",
            "Provides guidance on portfolio diversification, asset allocation, and investment strategy",
            &["portfolio", "diversification", "asset allocation", "investment strategy"],
            &[
                "How should I diversify my investment portfolio?",
                "What is a good asset allocation strategy?",
                "Help me build a balanced portfolio",
            ],
        ),
        skill(
            "risk_analysis",
            "Investment Risk Analysis",
            "Analyzes investment risk and provides risk management strategies",
            &["risk", "risk management", "volatility", "conservative investing"],
            &[
                "How do I assess investment risk?",
                "What are conservative investment options?",
                "How can I reduce portfolio risk?",
            ],
        ),
        skill(
            "market_analysis",
            "Market and Stock Analysis",
            "Provides insights on stock market investing, equity analysis, and market trends",
            &["stocks", "equity", "market analysis", "trading"],
            &[
                "How do I evaluate stocks?",
                "What should I know about stock market investing?",
                "Explain value investing vs growth investing",
            ],
        ),
        skill(
            "financial_planning",
            "Investment Planning and Strategy",
            "Helps with long-term investment planning and financial goal setting",
            &["planning", "strategy", "long-term investing", "financial goals"],
            &[
                "How should I plan for retirement?",
                "What is a good long-term investment strategy?",
                "Help me set investment goals",
            ],
        ),
    ];

    AgentCard {
        name: "Investment Strategy Agent".into(),
        description: "An AI-powered agent that provides investment advice, portfolio management guidance, \
            risk analysis, and market insights. Helps users make informed investment decisions \
            through comprehensive financial analysis."
            .into(),
        url: url.into(),
        version: env!("CARGO_PKG_VERSION").into(),
        default_input_modes: vec!["text".into()],
        default_output_modes: vec!["text".into()],
        capabilities: AgentCapabilities { streaming: true },
        skills,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_four_skills_with_stable_ids() {
        let card = create_agent_card("http://localhost:8000/");
        let ids: Vec<_> = card.skills.iter().map(|s| s.id.as_str()).collect();

        assert_eq!(
            ids,
            vec!["portfolio_management", "risk_analysis", "market_analysis", "financial_planning"]
        );
        assert_eq!(card, create_agent_card("http://localhost:8000/"));
        assert!(card.skills.iter().all(|s| s.examples.len() == 3 && !s.tags.is_empty()));
    }

    #[test]
    fn test_card_metadata() {
        let card = create_agent_card("http://example.com/");

        assert_eq!(card.name, "Investment Strategy Agent");
        assert_eq!(card.url, "http://example.com/");
        assert_eq!(card.version, "0.1.0");
        assert_eq!(card.default_input_modes, vec!["text"]);
        assert_eq!(card.default_output_modes, vec!["text"]);
        assert!(card.capabilities.streaming);
        assert!(!card.description.contains("  "));
    }
}
