//! Prompt text for the two delegate chains.

/// System message for AQL synthesis.
pub const AQL_SYSTEM: &str = "You are an AQL expert for ArangoDB. \
Translate the user's question into a single read-only AQL query against the \
described collections. Return ONLY the AQL query, no markdown, no explanations.";

pub fn aql_user(question: &str, schema: &str) -> String {
    format!(
        "Given these collections:\n{}\n\nTranslate this question into a read-only AQL query:\n\"{}\"",
        schema, question
    )
}

/// System message for result summarization.
pub const SUMMARY_SYSTEM: &str = "You summarize database query results as \
clear natural language for a non-technical reader. Answer the user's question \
from the rows provided, and say so plainly when the rows are empty.";

pub fn summary_user(question: &str, rows_json: &str) -> String {
    format!("Question: {}\n\nQuery result rows (JSON):\n{}", question, rows_json)
}

/// System message for visualization-code generation. The contract with the
/// model: pure Python source using networkx + matplotlib, saved with
/// `plt.savefig("static/plot.png")`, no `plt.show()`, no return statements.
/// Two few-shot examples pin the expected output format.
pub fn viz_system(question: &str, answer: &str) -> String {
    format!(
        r#"You are a Data Visualization Assistant. Your task is to generate only Python code for networkx visualizations based on the user query: {question} from our data: {answer}. The output must be pure Python code in a single fenced code block, without any text or explanations.

### Rules to Follow
1. Generate working visualization code for the data using the exact format and structure from the provided examples.
2. After generating the code, verify it thoroughly to ensure there are no errors and that it functions as expected.
3. Ensure the final visualization uses plt.savefig('static/plot.png'). Do not use plt.show() or return statements.

### Examples

*Example 1:*
*query:* 'list all the products of users'
*result:* 'The list of products purchased by users includes the following items: Wireless Mouse (products/prod1) was bought twice by one user and once by another at $29.99. A Ceramic Mug (products/prod2) was purchased once by one user and three times by another at $12.50.'
*Expected Model Output:*

```python
import networkx as nx
import matplotlib.pyplot as plt

# Create a directed graph
G = nx.DiGraph()

# Product details
product_details = {{
    "products/prod1": ("Wireless Mouse", 29.99),
    "products/prod2": ("Ceramic Mug", 12.50)
}}
product_nodes = {{pid: f"{{name}}\n(${{price}})" for pid, (name, price) in product_details.items()}}

users = ["User1", "User2"]
purchases = [("User1", "products/prod1", 2),
             ("User2", "products/prod1", 1),
             ("User1", "products/prod2", 1),
             ("User2", "products/prod2", 3)]

for pid, label in product_nodes.items():
    G.add_node(label, color="lightgreen")
for user in users:
    G.add_node(user, color="lightblue")
for user, pid, qty in purchases:
    G.add_edge(user, product_nodes[pid], weight=qty)

node_colors = [G.nodes[n]["color"] for n in G.nodes]

plt.figure(figsize=(7, 5))
pos = nx.spring_layout(G, seed=42)  # Fixed seed for consistent layout
nx.draw(G, pos, with_labels=True, node_color=node_colors, edge_color="gray", node_size=2500, font_size=9)
edge_labels = {{(u, v): G[u][v]["weight"] for u, v in G.edges}}
nx.draw_networkx_edge_labels(G, pos, edge_labels=edge_labels, font_size=9)

plt.title("Network Graph: User Product Purchases")
plt.savefig("static/plot.png")
```

*Example 2:*
*query:* 'list all the patients with diseases'
*result:* 'The patients diagnosed with diseases are: Drona (51, male, A-), Ashwatthama (47, male, A-), Parshurama (8, male, AB-), Daksha (89, female, A-), Hanuman (46, female, O+), Indra (81, male, O+). Some patients appear more than once because they are associated with multiple diseases.'
*Expected Model Output:*

```python
import networkx as nx
import matplotlib.pyplot as plt

# Create a directed graph
G = nx.DiGraph()

patient_details = {{
    "Drona": {{"age": 51, "gender": "male", "blood_type": "A-"}},
    "Ashwatthama": {{"age": 47, "gender": "male", "blood_type": "A-"}},
    "Parshurama": {{"age": 8, "gender": "male", "blood_type": "AB-"}},
    "Daksha": {{"age": 89, "gender": "female", "blood_type": "A-"}},
    "Hanuman": {{"age": 46, "gender": "female", "blood_type": "O+"}},
    "Indra": {{"age": 81, "gender": "male", "blood_type": "O+"}}
}}

diseases = ["Disease1", "Disease2"]
associations = [("Drona", "Disease1"),
                ("Ashwatthama", "Disease1"),
                ("Parshurama", "Disease2"),
                ("Daksha", "Disease1"),
                ("Hanuman", "Disease2"),
                ("Indra", "Disease1")]

for patient, details in patient_details.items():
    G.add_node(patient, color="lightblue", **details)
for disease in diseases:
    G.add_node(disease, color="lightgreen")
for patient, disease in associations:
    G.add_edge(patient, disease)

node_colors = [G.nodes[n]["color"] for n in G.nodes]

plt.figure(figsize=(9, 6))
pos = nx.spring_layout(G, seed=42)  # Fixed seed for consistent layout
nx.draw(G, pos, with_labels=True, node_color=node_colors, edge_color="gray", node_size=2500, font_size=8)

plt.title("Network Graph: Patient-Disease Associations")
plt.savefig("static/plot.png")
```
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_viz_system_interpolates_query_and_answer() {
        let prompt = viz_system("show the users", "two users found");
        assert!(prompt.contains("show the users"));
        assert!(prompt.contains("two users found"));
        assert!(prompt.contains("plt.savefig('static/plot.png')"));
    }

    #[test]
    fn test_aql_user_embeds_schema() {
        let prompt = aql_user("how many users", "- users (document collection): fields name");
        assert!(prompt.contains("how many users"));
        assert!(prompt.contains("users (document collection)"));
    }
}
