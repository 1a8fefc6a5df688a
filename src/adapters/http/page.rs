//! Single-page form served at `/`.

pub const INDEX_HTML: &str = r#"<!doctype html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>AI-Powered Campaign Assistant</title>
<style>
  body { font-family: system-ui, sans-serif; max-width: 52rem; margin: 2rem auto; padding: 0 1rem; }
  textarea { width: 100%; min-height: 6rem; font: inherit; }
  .status { margin-top: 1.5rem; padding: 1rem; border-radius: 6px; }
  .proposal { background: #e7f6ea; }
  .no_conclusion { background: #fff4d6; }
  .failed { background: #fde2e1; }
  .turn { border-top: 1px solid #ddd; padding: .5rem 0; white-space: pre-wrap; }
  .author { font-weight: 600; }
</style>
</head>
<body>
<h1>AI-Powered Campaign Assistant</h1>
<p>Chat with our AI agents to generate marketing campaigns.</p>
<form id="campaign">
  <label for="request">Enter your campaign request:</label>
  <textarea id="request" name="request">Create a campaign for an eco-friendly smartwatch.</textarea>
  <button type="submit" id="submit">Generate Campaign</button>
</form>
<div id="result"></div>
<details id="transcript-box" hidden>
  <summary>Agent Conversation Transcript</summary>
  <div id="transcript"></div>
</details>
<script>
const form = document.getElementById("campaign");
const button = document.getElementById("submit");
const result = document.getElementById("result");
const box = document.getElementById("transcript-box");
const transcript = document.getElementById("transcript");

function render(text, cls) {
  const div = document.createElement("div");
  div.className = "status " + cls;
  div.textContent = text;
  result.replaceChildren(div);
}

form.addEventListener("submit", async (event) => {
  event.preventDefault();
  button.disabled = true;
  render("Generating campaign...", "");
  box.hidden = true;
  try {
    const response = await fetch("/api/v1/campaigns", {
      method: "POST",
      headers: { "Content-Type": "application/json" },
      body: JSON.stringify({ request: document.getElementById("request").value }),
    });
    const data = await response.json();
    if (data.code) {
      render(data.error, "failed");
      return;
    }
    const heading = data.status === "proposal" ? "Final Campaign Proposal (" + data.role + "):\n\n" : "";
    render(heading + data.message, data.status);
    transcript.replaceChildren(...(data.transcript || []).map((turn) => {
      const div = document.createElement("div");
      div.className = "turn";
      const author = document.createElement("span");
      author.className = "author";
      author.textContent = turn.author + ": ";
      div.append(author, turn.content);
      return div;
    }));
    box.hidden = false;
  } catch (err) {
    render("Request failed: " + err, "failed");
  } finally {
    button.disabled = false;
  }
});
</script>
</body>
</html>
"#;
