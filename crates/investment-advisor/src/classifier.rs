//! Basic Response Classifier
//!
//! Keyword-matched investment guidance used when no model is configured.
//! Groups are tested in priority order and the first hit wins.

/// Topic selected for a query
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Topic {
    Diversification,
    Risk,
    Market,
    Welcome,
}

/// Static keyword lists, highest priority first
const TOPIC_KEYWORDS: &[(Topic, &[&str])] = &[
    (Topic::Diversification, &["diversif", "portfolio", "allocat"]),
    (Topic::Risk, &["risk", "safe", "conserv"]),
    (Topic::Market, &["stock", "equity", "share"]),
];

impl Topic {
    /// Classify a query by case-insensitive substring match
    pub fn classify(query: &str) -> Self {
        let query = query.to_lowercase();

        TOPIC_KEYWORDS
            .iter()
            .find(|(_, keywords)| keywords.iter().any(|kw| query.contains(kw)))
            .map_or(Self::Welcome, |(topic, _)| *topic)
    }

    /// Canned guidance for this topic
    pub const fn template(self) -> &'static str {
        match self {
            Self::Diversification => DIVERSIFICATION_TEMPLATE,
            Self::Risk => RISK_TEMPLATE,
            Self::Market => MARKET_TEMPLATE,
            Self::Welcome => WELCOME_TEMPLATE,
        }
    }
}

/// Guidance for `query` without a model
pub fn basic_response(query: &str) -> &'static str {
    Topic::classify(query).template()
}

pub const DIVERSIFICATION_TEMPLATE: &str = "Investment Portfolio Diversification Advice:

1. **Asset Allocation**: Consider spreading investments across different asset classes:
   - Stocks (equity) for growth potential
   - Bonds for stability and income
   - Real estate for inflation hedge
   - Cash equivalents for liquidity

2. **Geographic Diversification**: Don't limit yourself to domestic markets
\x20\x20\x20
3. **Sector Diversification**: Invest across various industries to reduce sector-specific risk

4. **Risk Assessment**: Align your portfolio with your risk tolerance and investment timeline

5. **Regular Rebalancing**: Review and adjust your portfolio periodically

Remember: Past performance doesn't guarantee future results. Consider consulting with a financial advisor for personalized advice.";

pub const RISK_TEMPLATE: &str = r"Risk Management in Investing:

1. **Understand Your Risk Tolerance**: Consider your age, income, financial goals, and comfort with volatility

2. **Risk Mitigation Strategies**:
   - Diversification across assets
   - Dollar-cost averaging
   - Setting stop-loss orders
   - Regular portfolio reviews

3. **Conservative Investment Options**:
   - Government bonds
   - High-grade corporate bonds
   - Index funds
   - Money market accounts

4. **Risk vs. Return**: Higher potential returns typically come with higher risk

5. **Time Horizon**: Longer investment periods can help weather market volatility

Always assess your personal financial situation before making investment decisions.";

pub const MARKET_TEMPLATE: &str = "Stock Market Investment Guidance:

1. **Research Before Investing**:\x20
   - Company fundamentals (earnings, revenue, debt)
   - Industry trends and competitive position
   - Management quality
\x20\x20\x20
2. **Investment Approaches**:
   - Value investing: Undervalued stocks with strong fundamentals
   - Growth investing: Companies with high growth potential
   - Index investing: Low-cost diversification through index funds

3. **Key Metrics to Consider**:
   - P/E ratio (Price-to-Earnings)
   - Dividend yield
   - Market capitalization
   - Revenue and earnings growth

4. **Long-term Perspective**: Avoid emotional decisions based on short-term market fluctuations

5. **Professional Guidance**: Consider consulting a financial advisor for personalized stock recommendations

Disclaimer: This is general information and not specific investment advice.";

pub const WELCOME_TEMPLATE: &str = r"Welcome to the Investment Strategy Agent!

I can help you with:

1. **Portfolio Management**: Diversification strategies and asset allocation
2. **Risk Assessment**: Understanding and managing investment risk
3. **Investment Strategies**: Growth, value, income, and index investing
4. **Market Analysis**: General market trends and sector analysis
5. **Financial Planning**: Long-term investment planning and goal setting

What specific investment topic would you like to explore?

Note: For AI-powered personalized analysis, please configure the GOOGLE_API_KEY environment variable with your Google API key to enable Gemini integration.

Disclaimer: This information is for educational purposes only and should not be considered as financial advice. Always consult with a qualified financial advisor before making investment decisions.";
