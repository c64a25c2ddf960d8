//! Title template placeholders.

/// A recognized `{name}` token in a title template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Placeholder {
    Topic,
    Time,
    Activity,
    Game,
    Skill,
    Achievement,
    Goal,
    Level,
}

impl Placeholder {
    pub const ALL: [Placeholder; 8] = [
        Placeholder::Topic,
        Placeholder::Time,
        Placeholder::Activity,
        Placeholder::Game,
        Placeholder::Skill,
        Placeholder::Achievement,
        Placeholder::Goal,
        Placeholder::Level,
    ];

    /// Name between the braces.
    pub fn name(&self) -> &'static str {
        match self {
            Placeholder::Topic => "topic",
            Placeholder::Time => "time",
            Placeholder::Activity => "activity",
            Placeholder::Game => "game",
            Placeholder::Skill => "skill",
            Placeholder::Achievement => "achievement",
            Placeholder::Goal => "goal",
            Placeholder::Level => "level",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.name() == name)
    }

    /// Substitution for this token. Only `topic` and `skill` depend on the
    /// category; the rest are neutral defaults.
    pub fn value(&self, category: &str) -> String {
        match self {
            Placeholder::Topic | Placeholder::Skill => capitalize(category),
            Placeholder::Time => "10 Minutes".to_string(),
            Placeholder::Activity => "Creating Content".to_string(),
            Placeholder::Game => "New Game".to_string(),
            Placeholder::Achievement => "Amazing Win".to_string(),
            Placeholder::Goal => "Victory".to_string(),
            Placeholder::Level => "Level 1".to_string(),
        }
    }

    fn token(&self) -> String {
        format!("{{{}}}", self.name())
    }
}

/// Replace every recognized placeholder in `template`.
pub fn expand(template: &str, category: &str) -> String {
    Placeholder::ALL
        .iter()
        .fold(template.to_string(), |acc, placeholder| {
            let token = placeholder.token();
            if acc.contains(&token) {
                acc.replace(&token, &placeholder.value(category))
            } else {
                acc
            }
        })
}

/// Names inside `{...}` that are not recognized placeholders.
pub fn unknown_placeholders(template: &str) -> Vec<String> {
    let mut unknown = Vec::new();
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        let after = &rest[start + 1..];
        let Some(end) = after.find('}') else {
            break;
        };
        let name = &after[..end];
        if Placeholder::from_name(name).is_none() {
            unknown.push(name.to_string());
        }
        rest = &after[end + 1..];
    }

    unknown
}

/// Uppercase the first character, leave the rest untouched.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_topic_and_time() {
        assert_eq!(
            expand("Master {topic} in {time} | Complete Guide", "tech"),
            "Master Tech in 10 Minutes | Complete Guide"
        );
    }

    #[test]
    fn test_expand_gaming_placeholders() {
        assert_eq!(expand("{game} Gameplay | {achievement}", "gaming"), "New Game Gameplay | Amazing Win");
        assert_eq!(expand("Playing {game} Until {goal}", "gaming"), "Playing New Game Until Victory");
        assert_eq!(expand("{game} Walkthrough: {level}", "gaming"), "New Game Walkthrough: Level 1");
    }

    #[test]
    fn test_expand_replaces_repeated_tokens() {
        assert_eq!(expand("{skill} and {skill}", "cooking"), "Cooking and Cooking");
    }

    #[test]
    fn test_expand_leaves_unknown_tokens() {
        assert_eq!(expand("{mystery} {topic}", "vlog"), "{mystery} Vlog");
    }

    #[test]
    fn test_unknown_placeholders() {
        assert!(unknown_placeholders("A Day in My Life | {activity}").is_empty());
        assert_eq!(unknown_placeholders("{topic} {host} {x"), vec!["host".to_string()]);
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("music"), "Music");
        assert_eq!(capitalize("élan"), "Élan");
        assert_eq!(capitalize(""), "");
    }
}
