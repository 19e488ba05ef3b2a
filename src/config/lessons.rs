//! Learning-centre content registry.
//!
//! Each lesson is a static record rendered at `/learn/{slug}`. Content is
//! trusted authored HTML, not user input, so it bypasses the sanitizer.

use once_cell::sync::Lazy;

#[derive(Debug, Clone)]
pub struct LessonLink {
    pub slug: &'static str,
    pub title: &'static str,
}

#[derive(Debug, Clone)]
pub struct Lesson {
    pub slug: &'static str,
    pub title: &'static str,
    pub module_label: &'static str,
    pub lesson_label: &'static str,
    pub headline: &'static str,
    pub subtitle: &'static str,
    pub prev: Option<LessonLink>,
    pub next: Option<LessonLink>,
    pub content: &'static str,
}

static REGISTRY: Lazy<Vec<Lesson>> = Lazy::new(|| {
    vec![
        Lesson {
            slug: "what-is-mutual-fund",
            title: "What is a Mutual Fund?",
            module_label: "Module 1",
            lesson_label: "Lesson 1",
            headline: "What is a Mutual Fund?",
            subtitle: "Understanding the building block of modern investing in India.",
            prev: None,
            next: Some(LessonLink { slug: "what-is-sip", title: "The Power of SIP" }),
            content: r#"
<p>Imagine you and 10,000 strangers each put ₹1,000 into a common pool and hire a
trained expert to invest it across stocks and bonds on everyone's behalf. Each person
owns a proportional slice of the whole portfolio. That is exactly what a
<strong>Mutual Fund</strong> does, at scale and under strict SEBI regulation.</p>
<h5>Units and NAV</h5>
<p>You do not own individual stocks; you own <strong>units</strong> priced at the fund's
<strong>NAV (Net Asset Value)</strong>: total portfolio value minus liabilities, divided by
units outstanding. NAV is published every business day. A fund at NAV ₹10 is not
"cheaper" than one at ₹500; only the percentage growth of NAV matters.</p>
<h5>Why funds over direct stocks?</h5>
<ul>
<li><strong>Diversification:</strong> even a ₹500 SIP spreads across 50&ndash;100 companies.</li>
<li><strong>Professional management:</strong> full-time managers and research teams.</li>
<li><strong>Regulation:</strong> SEBI mandates daily NAV disclosure and asset segregation.</li>
</ul>
"#,
        },
        Lesson {
            slug: "what-is-sip",
            title: "The Power of SIP",
            module_label: "Module 1",
            lesson_label: "Lesson 2",
            headline: "The Power of SIP",
            subtitle: "Why a fixed monthly habit beats timing the market.",
            prev: Some(LessonLink { slug: "what-is-mutual-fund", title: "What is a Mutual Fund?" }),
            next: Some(LessonLink { slug: "nav-explained", title: "NAV Explained" }),
            content: r#"
<p>A <strong>Systematic Investment Plan</strong> invests a fixed amount into a mutual fund
every month, regardless of market level. When markets fall your installment buys more
units; when they rise, fewer. Over the years this <em>rupee-cost averaging</em> smooths
your purchase price without any forecasting.</p>
<h5>The real engine: compounding</h5>
<p>Each installment earns returns, and those returns earn returns. ₹10,000 a month
for 15 years at 12% grows to about ₹50 Lakhs against ₹18 Lakhs invested.
The gap is compounding, and it widens dramatically with every additional year.</p>
"#,
        },
        Lesson {
            slug: "nav-explained",
            title: "NAV Explained",
            module_label: "Module 1",
            lesson_label: "Lesson 3",
            headline: "NAV, Demystified",
            subtitle: "The daily price tag of a mutual fund unit.",
            prev: Some(LessonLink { slug: "what-is-sip", title: "The Power of SIP" }),
            next: Some(LessonLink { slug: "risk-volatility", title: "Risk & Volatility" }),
            content: r#"
<p><strong>NAV = (portfolio value &minus; liabilities) / units outstanding.</strong>
It is computed after market close every business day. Two persistent myths:</p>
<ul>
<li>A low NAV is not "cheap". Your money buys proportionally more units; the growth
rate is what compounds.</li>
<li>NAV is not a stock price. There is no supply and demand for units; the AMC creates
and redeems them at NAV.</li>
</ul>
"#,
        },
        Lesson {
            slug: "risk-volatility",
            title: "Risk & Volatility",
            module_label: "Module 2",
            lesson_label: "Lesson 1",
            headline: "Risk is Not a Four-Letter Word",
            subtitle: "Volatility is the admission fee for long-term returns.",
            prev: Some(LessonLink { slug: "nav-explained", title: "NAV Explained" }),
            next: Some(LessonLink { slug: "compounding", title: "Compounding" }),
            content: r#"
<p>Equity markets regularly fall 10&ndash;20% within a year, yet long-period returns on
broad Indian indices have historically compounded in double digits. Volatility is
short-term noise; risk is the permanent loss of capital, which diversification and
holding period largely control.</p>
<h5>Matching horizon to asset</h5>
<ul>
<li>Under 3 years: debt funds and deposits.</li>
<li>3&ndash;5 years: hybrid funds.</li>
<li>5+ years: equity funds earn their volatility premium.</li>
</ul>
"#,
        },
        Lesson {
            slug: "compounding",
            title: "Compounding",
            module_label: "Module 2",
            lesson_label: "Lesson 2",
            headline: "The Eighth Wonder",
            subtitle: "Time in the market beats timing the market.",
            prev: Some(LessonLink { slug: "risk-volatility", title: "Risk & Volatility" }),
            next: Some(LessonLink { slug: "tax-planning", title: "Tax Planning" }),
            content: r#"
<p>Compounding is growth on growth. Its output is exponential in time, which is why a
ten-year head start is nearly impossible to overcome with bigger contributions later.
The rule of 72 gives a quick estimate: money doubles every 72/r years at r% return.</p>
<p>Starting a ₹5,000 SIP at 25 instead of 35 roughly <strong>triples</strong> the
corpus at 60, even though the early starter invests only 40% more.</p>
"#,
        },
        Lesson {
            slug: "tax-planning",
            title: "Tax Planning",
            module_label: "Module 3",
            lesson_label: "Lesson 1",
            headline: "Keep More of What You Earn",
            subtitle: "LTCG, STCG and the ELSS route.",
            prev: Some(LessonLink { slug: "compounding", title: "Compounding" }),
            next: None,
            content: r#"
<p>Equity fund gains are taxed by holding period: redeem within a year and the gain is
<strong>short-term (STCG)</strong>; hold beyond a year and it becomes
<strong>long-term (LTCG)</strong>, taxed at a lower rate after an annual exemption.
Debt fund gains are taxed at your slab rate.</p>
<p><strong>ELSS funds</strong> add a Section 80C deduction with the shortest lock-in
(3 years) of any 80C instrument, making them the usual first stop for tax-saving
equity exposure.</p>
"#,
        },
    ]
});

pub fn lessons() -> &'static [Lesson] {
    &REGISTRY
}

pub fn lesson_by_slug(slug: &str) -> Option<&'static Lesson> {
    REGISTRY.iter().find(|l| l.slug == slug)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prev_next_links_resolve() {
        for lesson in lessons() {
            for link in lesson.prev.iter().chain(lesson.next.iter()) {
                assert!(
                    lesson_by_slug(link.slug).is_some(),
                    "{} links to unknown lesson {}",
                    lesson.slug,
                    link.slug
                );
            }
        }
    }

    #[test]
    fn unknown_slug_is_none() {
        assert!(lesson_by_slug("options-trading").is_none());
    }
}
