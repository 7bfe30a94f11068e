use super::super::domain::{BigFiveTrait, DiscFactor};

pub(crate) fn summary(factor: DiscFactor, mbti_type: &str, score: f64) -> String {
    match factor {
        DiscFactor::Dominance => format!(
            "You are a results-driven {mbti_type} whose Dominance score of {score:.1}% shows a strong drive to take charge, decide quickly, and push through obstacles."
        ),
        DiscFactor::Influence => format!(
            "You are an enthusiastic {mbti_type} whose Influence score of {score:.1}% shows a talent for energizing people, building relationships, and persuading others."
        ),
        DiscFactor::Steadiness => format!(
            "You are a dependable {mbti_type} whose Steadiness score of {score:.1}% shows patience, loyalty, and a preference for stable, cooperative environments."
        ),
        DiscFactor::Conformity => format!(
            "You are a precise {mbti_type} whose Conformity score of {score:.1}% shows a commitment to accuracy, quality standards, and careful analysis."
        ),
    }
}

pub(crate) fn strengths(factor: DiscFactor) -> &'static [&'static str] {
    match factor {
        DiscFactor::Dominance => &[
            "Decisive under pressure",
            "Drives projects to completion",
            "Comfortable taking calculated risks",
            "Direct and goal-oriented",
        ],
        DiscFactor::Influence => &[
            "Builds rapport quickly",
            "Inspires and motivates others",
            "Persuasive communicator",
            "Optimistic and energizing",
        ],
        DiscFactor::Steadiness => &[
            "Reliable and consistent",
            "Patient listener",
            "Supports team cohesion",
            "Calm in times of change",
        ],
        DiscFactor::Conformity => &[
            "Detail-oriented and accurate",
            "Analytical problem solver",
            "Upholds quality standards",
            "Systematic planner",
        ],
    }
}

pub(crate) fn trait_strength(trait_: BigFiveTrait) -> &'static str {
    match trait_ {
        BigFiveTrait::Openness => "Creative and open to new ideas",
        BigFiveTrait::Conscientiousness => "Organized and dependable",
        BigFiveTrait::Extraversion => "Energized by collaboration",
        BigFiveTrait::Agreeableness => "Empathetic and cooperative",
        BigFiveTrait::Neuroticism => "Sensitive to risks others may overlook",
    }
}

pub(crate) fn trait_development(trait_: BigFiveTrait) -> &'static str {
    match trait_ {
        BigFiveTrait::Openness => "Experiment with unfamiliar approaches and perspectives",
        BigFiveTrait::Conscientiousness => "Build routines for planning and follow-through",
        BigFiveTrait::Extraversion => "Practice speaking up in group settings",
        BigFiveTrait::Agreeableness => "Consider how decisions land with other people",
        BigFiveTrait::Neuroticism => "Stay attentive to warning signs when things feel calm",
    }
}

pub(crate) const STRESS_MANAGEMENT: [&str; 3] = [
    "Develop a consistent stress-management routine",
    "Practice reframing setbacks as learning opportunities",
    "Set boundaries that protect recovery time",
];

pub(crate) const BEHAVIORAL_FLEXIBILITY: &str =
    "Increase behavioral flexibility by adapting your style to different situations";

pub(crate) fn career_paths(factor: DiscFactor, temperament: &str) -> Option<&'static [&'static str]> {
    let paths: &'static [&'static str] = match (factor, temperament) {
        (DiscFactor::Dominance, "ST") => &[
            "Operations Director",
            "Project Manager",
            "Entrepreneur",
        ],
        (DiscFactor::Dominance, "NT") => &[
            "Chief Executive",
            "Strategy Consultant",
            "Product Lead",
        ],
        (DiscFactor::Dominance, "SF") => &[
            "Sales Manager",
            "Emergency Services Lead",
            "Operations Supervisor",
        ],
        (DiscFactor::Dominance, "NF") => &[
            "Nonprofit Director",
            "Change Management Lead",
            "Organizational Coach",
        ],
        (DiscFactor::Influence, "NF") => &[
            "Marketing Director",
            "Public Relations Specialist",
            "Trainer or Facilitator",
        ],
        (DiscFactor::Influence, "SF") => &[
            "Sales Representative",
            "Event Planner",
            "Customer Success Manager",
        ],
        (DiscFactor::Influence, "NT") => &[
            "Business Development Lead",
            "Product Evangelist",
            "Innovation Consultant",
        ],
        (DiscFactor::Influence, "ST") => &[
            "Account Executive",
            "Recruiter",
            "Hospitality Manager",
        ],
        (DiscFactor::Steadiness, "SF") => &[
            "Nurse or Healthcare Provider",
            "Human Resources Specialist",
            "Teacher",
        ],
        (DiscFactor::Steadiness, "NF") => &[
            "Counselor",
            "Social Worker",
            "Community Coordinator",
        ],
        (DiscFactor::Steadiness, "ST") => &[
            "Office Manager",
            "Logistics Coordinator",
            "Customer Support Lead",
        ],
        (DiscFactor::Conformity, "ST") => &[
            "Accountant",
            "Quality Assurance Analyst",
            "Compliance Officer",
        ],
        (DiscFactor::Conformity, "NT") => &[
            "Software Engineer",
            "Data Scientist",
            "Research Analyst",
        ],
        (DiscFactor::Conformity, "SF") => &[
            "Medical Technologist",
            "Librarian",
            "Editor",
        ],
        _ => return None,
    };
    Some(paths)
}

pub(crate) const GENERIC_CAREERS: [&str; 3] =
    ["Team Coordinator", "Business Analyst", "Consultant"];

pub(crate) fn communication_style(factor: DiscFactor, expressive: bool) -> &'static str {
    match (factor, expressive) {
        (DiscFactor::Dominance, true) => "Direct and assertive; thinks out loud and expects quick answers",
        (DiscFactor::Dominance, false) => "Brief and to the point; prefers written summaries focused on outcomes",
        (DiscFactor::Influence, true) => "Animated and expressive; builds enthusiasm through storytelling",
        (DiscFactor::Influence, false) => "Warm and personable in one-on-one conversations",
        (DiscFactor::Steadiness, true) => "Friendly and supportive; encourages everyone to contribute",
        (DiscFactor::Steadiness, false) => "Calm and attentive listener; speaks after reflecting",
        (DiscFactor::Conformity, true) => "Structured and factual; shares detailed reasoning openly",
        (DiscFactor::Conformity, false) => "Precise and reserved; prefers documented, data-backed exchanges",
    }
}

pub(crate) fn leadership_style(factor: DiscFactor, structured: bool) -> &'static str {
    match (factor, structured) {
        (DiscFactor::Dominance, true) => "Strategic commander who sets clear goals and holds people accountable",
        (DiscFactor::Dominance, false) => "Pioneering leader who moves fast and adapts plans on the fly",
        (DiscFactor::Influence, true) => "Inspirational leader who pairs vision with organized follow-up",
        (DiscFactor::Influence, false) => "Motivational leader who rallies people around shared energy",
        (DiscFactor::Steadiness, true) => "Servant leader who builds dependable processes for the team",
        (DiscFactor::Steadiness, false) => "Supportive leader who leads through trust and consensus",
        (DiscFactor::Conformity, true) => "Methodical leader who establishes standards and quality controls",
        (DiscFactor::Conformity, false) => "Expert leader who guides through knowledge and analysis",
    }
}

pub(crate) const ANXIETY_INDICATORS: [&str; 3] = [
    "Heightened worry when outcomes are uncertain",
    "Tendency to ruminate on mistakes",
    "Physical tension during high-pressure periods",
];

pub(crate) fn stress_triggers(factor: DiscFactor) -> &'static [&'static str] {
    match factor {
        DiscFactor::Dominance => &[
            "Loss of control over outcomes",
            "Slow decision-making by others",
        ],
        DiscFactor::Influence => &[
            "Social rejection or isolation",
            "Highly detailed, repetitive work",
        ],
        DiscFactor::Steadiness => &[
            "Sudden or frequent change",
            "Interpersonal conflict",
        ],
        DiscFactor::Conformity => &[
            "Ambiguous expectations",
            "Pressure to cut corners on quality",
        ],
    }
}

pub(crate) fn growth_recommendations(factor: DiscFactor) -> &'static [&'static str] {
    match factor {
        DiscFactor::Dominance => &[
            "Practice active listening before deciding",
            "Invite input from quieter team members",
            "Balance speed with consideration for impact",
        ],
        DiscFactor::Influence => &[
            "Strengthen follow-through on commitments",
            "Use data to support persuasive arguments",
            "Schedule focused time for detailed work",
        ],
        DiscFactor::Steadiness => &[
            "Voice your opinions earlier in discussions",
            "Build comfort with change through small experiments",
            "Practice saying no to protect priorities",
        ],
        DiscFactor::Conformity => &[
            "Accept good-enough solutions when time is short",
            "Share work in progress to gather early feedback",
            "Develop comfort with ambiguity",
        ],
    }
}

pub(crate) const LOW_OPENNESS_GROWTH: &str = "Seek out one unfamiliar experience or idea each month";

pub(crate) const LOW_EXTRAVERSION_GROWTH: &str =
    "Build your network gradually through small, structured interactions";
