pub const POTHOLE_PROMPT: &str = "\
You are an expert pothole detection system. Analyze the provided image.
Your task is to determine ONLY if a pothole exists.
- If you find one or more potholes, provide a brief description and a severity score from 1 to 100 based on its size and potential hazard.
- If there are NO potholes, you MUST return a severity score of 0 and a null description.
Respond ONLY with a valid JSON object with the keys \"description\" and \"severity_score\".
";

pub const TRASH_PROMPT: &str = "\
You are an expert trash detection system. Analyze the provided image.
Your task is to determine ONLY if trash, litter, or illegal dumping exists.
- If you find trash, provide a brief description of the debris and a severity score from 1 to 100 based on its volume and environmental impact.
- If there is NO trash, you MUST return a severity score of 0 and a null description.
Respond ONLY with a valid JSON object with the keys \"description\" and \"severity_score\".
";

pub const GRAFFITI_PROMPT: &str = "\
You are an expert graffiti detection system. Analyze the provided image.
Your task is to determine ONLY if graffiti or vandalism exists.
- If you find graffiti, provide a brief description of the vandalism and a severity score from 1 to 100 based on its size and public visibility.
- If there is NO graffiti, you MUST return a severity score of 0 and a null description.
Respond ONLY with a valid JSON object with the keys \"description\" and \"severity_score\".
";

pub const SUMMARY_PROMPT: &str = "\
You are a city infrastructure and sanitation analyst. Based on the following JSON report from specialist AI agents,
write a concise, one-paragraph executive summary for a city manager.

Focus on the most severe issues found. If all severity scores are 0, state that the area is clear of issues.

JSON Report:
{{JSON_REPORT}}

Executive Summary:
";

pub const JSON_REPORT_PLACEHOLDER: &str = "{{JSON_REPORT}}";
