/// Maximum number of genre hashtags emitted
const MAX_GENRE_TAGS: usize = 3;

/// Build the type hashtag and up to three genre hashtags.
///
/// `primary_genres` are used when non-empty, otherwise `fallback_genres`.
/// The result is two lines: `#Type` and then the space-separated genres.
pub fn create_hashtags<P, F>(kind_label: &str, primary_genres: &[P], fallback_genres: &[F]) -> String
where
    P: AsRef<str>,
    F: AsRef<str>,
{
    let type_tag = format!("#{}", kind_label.replace(' ', ""));

    let genres: Vec<&str> = if !primary_genres.is_empty() {
        primary_genres.iter().map(|g| g.as_ref()).collect()
    } else {
        fallback_genres.iter().map(|g| g.as_ref()).collect()
    };

    let genre_tags: Vec<String> = genres
        .into_iter()
        .take(MAX_GENRE_TAGS)
        .filter_map(|genre| {
            let clean = genre.replace([' ', '-', '&', '/'], "");
            (clean.chars().count() > 2).then(|| format!("#{}", clean))
        })
        .collect();

    if genre_tags.is_empty() {
        type_tag
    } else {
        format!("{}\n{}", type_tag, genre_tags.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primary_genres_win() {
        let tags = create_hashtags("Película", &["Acción", "Ciencia ficción"], &["Drama"]);
        assert_eq!(tags, "#Película\n#Acción #Cienciaficción");
    }

    #[test]
    fn test_fallback_genres_used_when_primary_empty() {
        let empty: [&str; 0] = [];
        let tags = create_hashtags("Serie", &empty, &["Drama"]);
        assert_eq!(tags, "#Serie\n#Drama");
    }

    #[test]
    fn test_at_most_three_genres_and_degenerate_rejected() {
        let tags = create_hashtags(
            "Serie",
            &["Sci-Fi & Fantasy", "&", "War & Politics", "Drama"],
            &["Crime"],
        );
        // only the first three are considered; "&" cleans to nothing
        assert_eq!(tags, "#Serie\n#SciFiFantasy #WarPolitics");
    }

    #[test]
    fn test_type_only_without_genres() {
        let empty: [&str; 0] = [];
        assert_eq!(create_hashtags("Media Type", &empty, &empty), "#MediaType");
    }
}
