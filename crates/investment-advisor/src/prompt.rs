//! Prompt construction for model-backed analysis

/// Wrap a user query in the investment-advisor instruction
pub fn build_prompt(query: &str) -> String {
    format!(
        "You are an investment advisor agent. Provide professional, \n\
informative responses about investment strategies, financial markets, and portfolio management.\n\
\n\
User query: {query}\n\
\n\
Provide a clear, helpful response focused on investment strategy and financial analysis.\n\
Include relevant considerations like risk management, diversification, and market trends where appropriate."
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_embeds_query() {
        let prompt = build_prompt("Should I buy index funds?");

        assert!(prompt.starts_with("You are an investment advisor agent."));
        assert!(prompt.contains("\nUser query: Should I buy index funds?\n"));
        for topic in ["risk management", "diversification", "market trends"] {
            assert!(prompt.contains(topic), "{topic}");
        }
    }
}
