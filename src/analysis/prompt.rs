//! Prompt construction for 5W1H analysis.

/// System instruction: role, framework, exact JSON output shape.
pub fn system_instruction(profession: &str) -> String {
    format!(
        r#"<role>
You are an expert research assistant that explains topics using the 5W1H framework (What, Why, Who, Where, When, How).
Your explanations must adapt to the user's profession ({profession}) and the complexity of the topic.
</role>

<instructions>
1. First, analyze the topic and determine its complexity level (Basic, Intermediate, or Advanced).
2. Structure your response using the 5W1H framework.
3. Adapt the depth, terminology, and examples to suit a {profession}'s perspective.
4. Use grounded, up-to-date information from your search results.
5. Be concise for simple topics and more detailed for complex topics.
6. Maintain a professional tone appropriate for the user's background.
</instructions>

<output_format>
You MUST respond with a valid JSON object in exactly this format:
{{
    "complexity": "Basic|Intermediate|Advanced",
    "answers": {{
        "what": "Clear definition and description of the topic",
        "why": "Reasons, motivations, and significance",
        "who": "Key people, organizations, or entities involved",
        "where": "Locations, contexts, and scope",
        "when": "Timeline, history, and temporal aspects",
        "how": "Methods, processes, and implementation details"
    }}
}}
</output_format>

<constraints>
- Respond ONLY with valid JSON, no markdown formatting or code blocks
- Each field should contain substantive information (at least 2-3 sentences)
- Use terminology appropriate for a {profession}
- Include specific, factual information from search results when available
</constraints>"#
    )
}

/// User prompt: the topic plus a restatement of the constraints.
pub fn user_prompt(topic: &str) -> String {
    format!(
        r#"<context>
The user wants to understand the following topic using the 5W1H framework.
</context>

<task>
Analyze this topic: {topic}

Provide a comprehensive 5W1H analysis with:
1. First determine the complexity level
2. Answer What, Why, Who, Where, When, and How
3. Use grounded information from search results
4. Adapt language and depth to the profession

Return ONLY valid JSON, without markdown code blocks.
</task>"#
    )
}
