// Resume extraction prompt. The schema below is a request to the model, not
// something the service validates afterwards.

pub const RESUME_EXTRACTION_PROMPT: &str = r#"Extract the following details from the resume and return them in a valid JSON format with these exact field names:
{
  "fileName": "Optional: Original file name (e.g., JohnDoe_Resume.pdf)",
  "name": "Full Name",
  "email": "Email Address",
  "phone": "Phone Number",
  "yearsOfExperience": number,
  "keySkills": ["skill1", "skill2"],
  "educationSummary": "Education details",
  "workHistory": [
    {
      "company": "Company Name",
      "position": "Job Title",
      "duration": "Time period (e.g., 2018 - 2022)",
      "description": "Job description or key responsibilities"
    }
  ]
}

Resume Text: {resume_text}"#;

pub fn build_extraction_prompt(resume_text: &str) -> String {
    RESUME_EXTRACTION_PROMPT.replace("{resume_text}", resume_text)
}
