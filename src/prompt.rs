//! System-prompt construction for the text-generation model.
//!
//! The prompt encodes the whole output contract: exactly five parts, a JSON
//! shape matching [`BilingualStory`](crate::story::BilingualStory), and
//! pure-Chinese target text with worked substitution examples. The examples
//! are guidance for the model; enforcement happens after parsing, in
//! [`crate::story`].

use crate::age::{band_for_age, leading_age};
use crate::ports::story_generator::StoryRequest;

/// Build the complete generation instruction for one story request.
#[must_use]
pub fn build_system_prompt(request: &StoryRequest) -> String {
    let band = band_for_age(leading_age(&request.age));

    let main_character = request
        .child_name
        .as_deref()
        .map_or_else(|| "A young adventurer".to_string(), |name| name.to_string());
    let companion = request
        .companion
        .as_deref()
        .map_or_else(|| "A helpful friend".to_string(), |c| c.to_string());

    let cultural_context = request.cultural_tag.as_deref().map_or_else(
        || {
            "Create a globally inclusive story that celebrates universal human values and \
             experiences."
                .to_string()
        },
        |tag| {
            format!(
                "Incorporate authentic {tag} cultural elements, traditions, and values naturally \
                 into the story."
            )
        },
    );

    let memory_context = request.memory.as_deref().map_or_else(
        || "Create an original, engaging story.".to_string(),
        |memory| {
            format!(
                "Weave this memory naturally into the narrative while maintaining cultural \
                 authenticity: {memory}"
            )
        },
    );

    format!(
        "You are a bilingual children's story generator that creates engaging stories in both \
         English and Chinese, broken into exactly 5 parts for a picture book format.\n\
         \n\
         Key requirements for the Chinese translation:\n\
         1. ALL text MUST be in Chinese characters - no English or Latin characters allowed\n\
         2. Convert ALL measurements and numbers to Chinese characters (e.g., \"1 year old\" → \
         \"一岁\")\n\
         3. Translate ALL names to Chinese characters:\n\
         \x20  - Western names should use phonetic translation\n\
         \x20  - Family members should use proper Chinese terms (e.g., \"Dad\" → \"爸爸\", \
         \"Mom\" → \"妈妈\", \"Grandma\" → \"奶奶\")\n\
         \x20  - Cultural terms should use standard Chinese translations (e.g., \"Indian\" → \
         \"印度\")\n\
         4. Convert ALL actions and descriptions to natural Chinese:\n\
         \x20  - \"Dad bought toys\" → \"爸爸买了玩具\"\n\
         \x20  - \"include spices\" → \"包括香料\"\n\
         5. Use appropriate Chinese measure words (量词) for all nouns\n\
         6. Ensure all sentences follow Chinese grammar structure, not English structure\n\
         7. Use Chinese punctuation (。，！？) instead of English punctuation, DO NOT USE ANY \
         ENGLISH CHARACTERS WHATSOEVER\n\
         \n\
         Story Parameters:\n\
         - Theme: {theme}\n\
         - Age: {age} years old\n\
         - Main Character: {main_character}\n\
         - Companion: {companion}\n\
         \n\
         The story should be age-appropriate with:\n\
         - Complexity: {complexity}\n\
         - Word limit per part: {word_limit} words\n\
         - Vocabulary level: {vocabulary}\n\
         - Visual emphasis: {image_emphasis}\n\
         - Interaction style: {interaction_style}\n\
         \n\
         {cultural_context}\n\
         \n\
         {memory_context}\n\
         \n\
         IMPORTANT: Break the story into exactly 5 parts. Each part should be a complete scene \
         or moment that can be illustrated. For each part, also provide a detailed image \
         generation prompt that describes the scene visually for AI image generation.\n\
         \n\
         Return ONLY a JSON object with this exact structure (no additional text):\n\
         {schema}",
        theme = request.prompt,
        age = request.age,
        complexity = band.complexity,
        word_limit = band.word_limit,
        vocabulary = band.vocabulary,
        image_emphasis = band.image_emphasis,
        interaction_style = band.interaction_style,
        schema = response_schema(),
    )
}

/// The literal JSON shape demanded from the model, with one entry per part.
fn response_schema() -> String {
    let parts: Vec<String> = (1..=crate::story::STORY_PART_COUNT)
        .map(|i| {
            format!(
                "    {{\n\
                 \x20     \"english\": \"Part {i} story text in English\",\n\
                 \x20     \"chinese\": \"Part {i} story text in Chinese (100% Chinese characters)\",\n\
                 \x20     \"imagePrompt\": \"Detailed image generation prompt for part {i} scene\"\n\
                 \x20   }}"
            )
        })
        .collect();

    format!(
        "{{\n\
         \x20 \"title\": {{\n\
         \x20   \"english\": \"Story title in English\",\n\
         \x20   \"chinese\": \"Story title in Chinese (100% Chinese characters)\"\n\
         \x20 }},\n\
         \x20 \"parts\": [\n{}\n  ]\n\
         }}",
        parts.join(",\n")
    )
}
