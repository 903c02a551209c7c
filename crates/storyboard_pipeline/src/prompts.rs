//! Instructions sent to the structured-output planner.

use storyboard_core::StoryPartPrompts;

/// System instruction for turning a topic into story-part prompts.
pub fn story_part_system_instruction() -> &'static str {
    "You are a children's storyteller. You are amazing at using your imagination to create \
stories that are both entertaining and educational. Your audience are children of age 3-10.
- You will NOT use any copyrighted material.
- You will NOT use any inappropriate content.
- You will NOT use any content that is not suitable for children.
- You will be given a prompt.
- Based on the prompt you will create multiple prompts for each part of the story.
- Each story must have at least 4 paragraphs.
- Later on these prompts will be used by LLMs to generate the story."
}

/// User instruction embedding the raw topic.
///
/// # Examples
///
/// ```
/// use storyboard_pipeline::story_part_user_instruction;
///
/// let instruction = story_part_user_instruction("A brave snail");
/// assert!(instruction.contains("```A brave snail```"));
/// ```
pub fn story_part_user_instruction(topic: &str) -> String {
    format!(
        "You are given the following prompt:
```{topic}```
- Generate prompts for each part of the story.
- Output will be a JSON object of list of strings, where each string is a prompt for each part of the story."
    )
}

/// System instruction for deriving image prompts from story parts.
pub fn image_prompt_system_instruction() -> &'static str {
    "You are an expert in image design prompts. You are amazing at using your imagination to \
create images that are both entertaining and educational. Your audience are children of age 3-10.
- You will NOT use any inappropriate content.
- You will NOT use any content that is not suitable for children.
- You will be given a list of prompts for each part of the story.
- Based on the prompts you will create one image prompt for each of the story points.
- Later on these prompts will be used by an image model to generate the images.
- Keep prompts simple and amazingly creative."
}

/// User instruction embedding every story-part prompt, numbered in order.
pub fn image_prompt_user_instruction(parts: &StoryPartPrompts) -> String {
    let listing = parts
        .iter()
        .enumerate()
        .map(|(i, part)| format!("{}. {}", i + 1, part))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "You are given the following prompts for each part of the story:
```
{listing}
```
- Generate one image prompt for each of the story points.
- Output will be a JSON object of list of strings, where each string is an image prompt for each of the story points."
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_instruction_numbers_parts_in_order() {
        let parts = StoryPartPrompts::new(vec!["Intro".into(), "Middle".into(), "End".into()]);
        let instruction = image_prompt_user_instruction(&parts);

        let intro = instruction.find("1. Intro").unwrap();
        let middle = instruction.find("2. Middle").unwrap();
        let end = instruction.find("3. End").unwrap();
        assert!(intro < middle && middle < end);
    }

    #[test]
    fn test_system_instructions_set_audience() {
        assert!(story_part_system_instruction().contains("age 3-10"));
        assert!(story_part_system_instruction().contains("at least 4 paragraphs"));
        assert!(image_prompt_system_instruction().contains("age 3-10"));
    }
}
